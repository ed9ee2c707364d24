use anyhow::Result;
use std::path::{Path, PathBuf};
use tantivy::{Index, IndexWriter, TantivyDocument};

use docq_core::types::Document;

use crate::tantivy_utils::{build_schema, register_tokenizer, DocFields};

const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Builds the lexical index from a loaded corpus. Rebuilding replaces any
/// existing index in `index_dir`.
pub struct TantivyIndexer {
	index: Index,
	fields: DocFields,
	index_dir: PathBuf,
}

impl TantivyIndexer {
	pub fn create(index_dir: &Path) -> Result<Self> {
		let schema = build_schema();
		if index_dir.exists() { std::fs::remove_dir_all(index_dir)?; }
		std::fs::create_dir_all(index_dir)?;
		let index = Index::create_in_dir(index_dir, schema.clone())?;
		register_tokenizer(&index);
		let fields = DocFields::resolve(&schema)?;
		Ok(Self { index, fields, index_dir: index_dir.to_path_buf() })
	}

	pub fn index_documents(&self, docs: &[Document]) -> Result<usize> {
		let mut writer: IndexWriter = self.index.writer(WRITER_HEAP_BYTES)?;
		let mut count = 0usize;
		for d in docs {
			if d.content.trim().is_empty() { continue; }
			let mut doc = TantivyDocument::default();
			doc.add_text(self.fields.content, &d.content);
			for (key, field) in &self.fields.metadata {
				doc.add_text(*field, d.meta(key));
			}
			writer.add_document(doc)?;
			count += 1;
		}
		writer.commit()?;
		tracing::info!(documents = count, dir = %self.index_dir.display(), "tantivy index committed");
		Ok(count)
	}
}
