use anyhow::Result;
use std::path::Path;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::Value;
use tantivy::{Index, IndexReader, TantivyDocument};

use docq_core::traits::LexicalIndex;
use docq_core::types::{Document, Meta};

use crate::tantivy_utils::{register_tokenizer, DocFields};

/// Read-only handle on a committed Tantivy index.
///
/// The reader is opened once; each search takes a fresh searcher, so
/// concurrent searches need no extra locking.
pub struct TantivyLexicalIndex {
	index: Index,
	reader: IndexReader,
	fields: DocFields,
}

impl TantivyLexicalIndex {
	pub fn open(index_dir: &Path) -> Result<Self> {
		let index = Index::open_in_dir(index_dir)?;
		register_tokenizer(&index);
		let reader = index.reader()?;
		let fields = DocFields::resolve(&index.schema())?;
		Ok(Self { index, reader, fields })
	}

	/// `Ok(None)` when no index has been built at `index_dir` yet.
	pub fn open_if_exists(index_dir: &Path) -> Result<Option<Self>> {
		if !index_dir.join("meta.json").exists() {
			tracing::info!(dir = %index_dir.display(), "no tantivy index present");
			return Ok(None);
		}
		Self::open(index_dir).map(Some)
	}

	pub fn num_docs(&self) -> u64 { self.reader.searcher().num_docs() }

	fn to_document(&self, doc: &TantivyDocument) -> Document {
		let text = |field: tantivy::schema::Field| doc.get_first(field).and_then(|v| v.as_str()).unwrap_or("").to_string();
		let mut metadata = Meta::new();
		for (key, field) in &self.fields.metadata {
			metadata.insert((*key).to_string(), text(*field));
		}
		Document::new(text(self.fields.content), metadata)
	}
}

impl LexicalIndex for TantivyLexicalIndex {
	fn search(&self, query: &str, k: usize) -> Result<Vec<(Document, f32)>> {
		let searcher = self.reader.searcher();
		let qp = QueryParser::for_index(&self.index, vec![self.fields.content]);
		let (q, errors) = qp.parse_query_lenient(query);
		if !errors.is_empty() {
			tracing::debug!(query, errors = errors.len(), "lenient query parse dropped clauses");
		}
		let top_docs = searcher.search(&q, &TopDocs::with_limit(k))?;
		let mut hits = Vec::with_capacity(top_docs.len());
		for (score, addr) in top_docs {
			let doc: TantivyDocument = searcher.doc(addr)?;
			hits.push((self.to_document(&doc), score));
		}
		Ok(hits)
	}
}
