//! JSONL corpus loader.
//!
//! Each non-blank line is one record. Either shape is accepted:
//! `{"content": "...", "metadata": {"page_id": "..."}}` or a flat row exported
//! from the user guide (`content`/`enhancedContent` plus metadata keys at the
//! top level). Rows with no usable content are skipped.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Document, Meta, METADATA_KEYS};

#[derive(Debug, Deserialize)]
struct CorpusRow {
    #[serde(default)]
    content: Option<String>,
    #[serde(default, rename = "enhancedContent")]
    enhanced_content: Option<String>,
    #[serde(default)]
    metadata: Meta,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl CorpusRow {
    fn into_document(self) -> Option<Document> {
        let content = [self.content, self.enhanced_content]
            .into_iter()
            .flatten()
            .find(|c| !c.trim().is_empty())?;
        let mut metadata = self.metadata;
        for key in METADATA_KEYS {
            if let Some(serde_json::Value::String(v)) = self.extra.get(key) {
                metadata.entry(key.to_string()).or_insert_with(|| v.clone());
            }
        }
        Some(Document::new(content, metadata))
    }
}

#[derive(Default)]
pub struct CorpusLoader;

impl CorpusLoader {
    pub fn new() -> Self { Self }

    /// Load every `.jsonl` file under `dir`, in path order.
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<Document>> {
        let files = Self::list_jsonl_files(dir);
        if files.is_empty() {
            tracing::warn!(dir = %dir.display(), "no .jsonl files found");
            return Ok(vec![]);
        }
        let mut docs = Vec::new();
        for (i, path) in files.iter().enumerate() {
            tracing::info!(file = %path.display(), "loading corpus file {}/{}", i + 1, files.len());
            docs.extend(self.load_file(path)?);
        }
        tracing::info!(files = files.len(), documents = docs.len(), "corpus loaded");
        Ok(docs)
    }

    pub fn load_file(&self, path: &Path) -> Result<Vec<Document>> {
        let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        self.parse_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse_str(&self, raw: &str) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for (line_no, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() { continue; }
            let row: CorpusRow = serde_json::from_str(line).with_context(|| format!("line {}", line_no + 1))?;
            match row.into_document() {
                Some(doc) => docs.push(doc),
                None => tracing::debug!(line = line_no + 1, "skipping row without content"),
            }
        }
        Ok(docs)
    }

    fn list_jsonl_files(root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("jsonl"))
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        files
    }
}
