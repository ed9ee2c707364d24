use std::fs;
use tempfile::TempDir;

use docq_core::config::{resolve_with_base, Config};
use docq_core::corpus::CorpusLoader;
use docq_core::types::SearchMode;
use figment::providers::{Format, Toml};
use figment::Figment;

#[test]
fn load_dir_reads_both_row_shapes() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir_all(dir.join("guide")).unwrap();
    fs::write(
        dir.join("guide/a.jsonl"),
        concat!(
            "{\"content\": \"Install the server\", \"metadata\": {\"page_id\": \"install\"}}\n",
            "\n",
            "{\"headingTrace\": \"Login\", \"section_id\": \"login\", \"content\": \"\", \"enhancedContent\": \"How to log in\"}\n",
        ),
    )
    .unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let docs = CorpusLoader::new().load_dir(dir).expect("load");

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].content, "Install the server");
    assert_eq!(docs[0].meta("page_id"), "install");
    assert_eq!(docs[0].meta("pageTrace"), "", "missing keys are empty, not absent");
    assert_eq!(docs[1].content, "How to log in", "falls back to enhancedContent");
    assert_eq!(docs[1].meta("headingTrace"), "Login");
    assert_eq!(docs[1].meta("section_id"), "login");
}

#[test]
fn rows_without_content_are_skipped() {
    let docs = CorpusLoader::new().parse_str("{\"page_id\": \"empty\"}\n{\"content\": \"kept\"}").expect("parse");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "kept");
}

#[test]
fn malformed_line_reports_position() {
    let err = CorpusLoader::new().parse_str("{\"content\": \"ok\"}\nnot json").unwrap_err();
    assert!(format!("{err:#}").contains("line 2"), "got: {err:#}");
}

#[test]
fn settings_default_when_empty() {
    let config = Config::from_figment(Figment::new());
    let settings = config.settings().expect("settings");
    assert_eq!(settings.search.default_k, 3);
    assert_eq!(settings.search.max_terms_per_hit, 2);
    assert_eq!(settings.search.default_mode, SearchMode::Auto);
    assert!(settings.search.deadline().is_none());
    assert_eq!(settings.embed.dim, 768);
}

#[test]
fn settings_read_from_toml() {
    let toml = r#"
        [search]
        default_k = 5
        deadline_ms = 250
        default_mode = "semantic"

        [data]
        table_name = "guide"
    "#;
    let config = Config::from_figment(Figment::new().merge(Toml::string(toml)));
    let settings = config.settings().expect("settings");
    assert_eq!(settings.search.default_k, 5);
    assert_eq!(settings.search.deadline(), Some(std::time::Duration::from_millis(250)));
    assert_eq!(settings.search.default_mode, SearchMode::Semantic);
    assert_eq!(settings.data.table_name, "guide");
    let k: usize = config.get("search.default_k").expect("get");
    assert_eq!(k, 5);
}

#[test]
fn zero_default_k_is_rejected() {
    let config = Config::from_figment(Figment::new().merge(Toml::string("[search]\ndefault_k = 0")));
    assert!(config.settings().is_err());
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = std::path::Path::new("/srv/docq");
    assert_eq!(resolve_with_base(base, "data/idx"), base.join("data/idx"));
    assert_eq!(resolve_with_base(base, "/abs/idx"), std::path::PathBuf::from("/abs/idx"));
}
