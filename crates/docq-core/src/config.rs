//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_SEARCH__DEFAULT_K=5`). Typed sections
//! are extracted with [`Config::settings`]; every field has a default so an
//! empty configuration is valid.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;
use crate::types::SearchMode;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.settings()?;
        Ok(config)
    }

    /// Wrap an already-assembled figment (used by tests and embedders of the library).
    pub fn from_figment(figment: Figment) -> Self { Self { figment } }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extract and validate all typed sections.
    pub fn settings(&self) -> Result<Settings, Error> {
        let settings: Settings = self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub data: DataSettings,
    pub embed: EmbedSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.search.default_k == 0 {
            return Err(Error::InvalidConfig("search.default_k must be > 0".into()));
        }
        if self.embed.dim == 0 {
            return Err(Error::InvalidConfig("embed.dim must be > 0".into()));
        }
        if self.data.table_name.trim().is_empty() {
            return Err(Error::InvalidConfig("data.table_name must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub default_k: usize,
    pub max_terms_per_hit: usize,
    pub deadline_ms: Option<u64>,
    pub default_mode: SearchMode,
}

impl SearchSettings {
    pub fn deadline(&self) -> Option<Duration> { self.deadline_ms.map(Duration::from_millis) }
}

impl Default for SearchSettings {
    fn default() -> Self { Self { default_k: 3, max_terms_per_hit: 2, deadline_ms: None, default_mode: SearchMode::Auto } }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub corpus_dir: String,
    pub tantivy_index_dir: String,
    pub lancedb_dir: String,
    pub table_name: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            corpus_dir: "data/corpus".to_string(),
            tantivy_index_dir: "data/indexes/tantivy".to_string(),
            lancedb_dir: "data/indexes/lancedb".to_string(),
            table_name: "userguide_v1".to_string(),
        }
    }
}

impl DataSettings {
    pub fn corpus_path(&self, base: &Path) -> PathBuf { resolve_with_base(base, &self.corpus_dir) }
    pub fn tantivy_path(&self, base: &Path) -> PathBuf { resolve_with_base(base, &self.tantivy_index_dir) }
    pub fn lancedb_path(&self, base: &Path) -> PathBuf { resolve_with_base(base, &self.lancedb_dir) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedSettings {
    pub dim: usize,
}

impl Default for EmbedSettings {
    fn default() -> Self { Self { dim: 768 } }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
