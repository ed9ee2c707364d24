use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use docq_core::config::{Config, Settings};
use docq_core::corpus::CorpusLoader;
use docq_core::types::SearchMode;
use docq_embed::get_default_embedder;
use docq_hybrid::{Backends, Orchestrator};
use docq_text::{TantivyIndexer, TantivyLexicalIndex};
use docq_vector::{LanceDbIndexer, LanceVectorStore};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <ingest [corpus_dir] | query \"<text>\" [k] [mode]>", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    // stdout carries the JSON response; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let base = env::current_dir()?;
    let (cmd, args) = parse_args();
    let rt = tokio::runtime::Runtime::new()?;
    match cmd.as_str() {
        "ingest" => {
            let corpus_dir = args.first().map(PathBuf::from).unwrap_or_else(|| settings.data.corpus_path(&base));
            rt.block_on(ingest(&settings, &base, &corpus_dir))?;
        }
        "query" => {
            let Some(query) = args.first() else {
                eprintln!("Usage: docq query \"<text>\" [k] [mode]");
                std::process::exit(1)
            };
            let k = match args.get(1) {
                Some(raw) => raw.parse::<usize>().map_err(|e| anyhow::anyhow!("invalid k '{}': {}", raw, e))?,
                None => settings.search.default_k,
            };
            let mode = match args.get(2) {
                Some(raw) => raw.parse::<SearchMode>()?,
                None => settings.search.default_mode,
            };
            let response = rt.block_on(query_once(&settings, &base, query, k, mode))?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        _ => { eprintln!("Unknown command: {}", cmd); std::process::exit(1); }
    }
    Ok(())
}

async fn ingest(settings: &Settings, base: &Path, corpus_dir: &Path) -> anyhow::Result<()> {
    tracing::info!(dir = %corpus_dir.display(), "ingesting corpus");
    let docs = CorpusLoader::new().load_dir(corpus_dir)?;
    if docs.is_empty() {
        tracing::warn!("corpus is empty; nothing to index");
        return Ok(());
    }

    let tantivy_dir = settings.data.tantivy_path(base);
    let indexed = TantivyIndexer::create(&tantivy_dir)?.index_documents(&docs)?;
    tracing::info!(indexed, dir = %tantivy_dir.display(), "tantivy index built");

    let lancedb_dir = settings.data.lancedb_path(base);
    if lancedb_dir.exists() { fs::remove_dir_all(&lancedb_dir)?; }
    fs::create_dir_all(&lancedb_dir)?;
    let indexer = LanceDbIndexer::new(&lancedb_dir, &settings.data.table_name, get_default_embedder(settings.embed.dim)?).await?;
    let rows = indexer.index_documents(&docs).await?;
    tracing::info!(rows, dir = %lancedb_dir.display(), table = %settings.data.table_name, "lancedb table built");

    eprintln!("✅ Ingest complete ({} documents)", docs.len());
    Ok(())
}

async fn query_once(
    settings: &Settings,
    base: &Path,
    query: &str,
    k: usize,
    mode: SearchMode,
) -> anyhow::Result<docq_core::types::SearchResponse> {
    let lexical = TantivyLexicalIndex::open_if_exists(&settings.data.tantivy_path(base))?;
    let vector = LanceVectorStore::open_if_exists(
        &settings.data.lancedb_path(base),
        &settings.data.table_name,
        get_default_embedder(settings.embed.dim)?,
    )
    .await?;
    let mut backends = Backends::init(lexical, vector);
    let orchestrator = Orchestrator::new(&backends, &settings.search);
    let response = orchestrator.search_with_deadline(query, k, mode, settings.search.deadline()).await;
    drop(orchestrator);
    backends.shutdown();
    Ok(response?)
}
