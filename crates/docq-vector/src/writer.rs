use anyhow::{anyhow, Result};
use arrow_array::{ArrayRef, FixedSizeListArray, RecordBatch, RecordBatchIterator, StringArray};
use indicatif::{ProgressBar, ProgressStyle};
use lancedb::Connection;
use std::path::Path;
use std::sync::Arc;

use docq_core::traits::Embedder;
use docq_core::types::{Document, METADATA_KEYS};

use crate::schema::build_arrow_schema;
use crate::table::{open_db, table_exists};

const BATCH_SIZE: usize = 256;

/// Embeds corpus documents and appends them to a LanceDB table,
/// creating the table on first insert.
pub struct LanceDbIndexer {
	db: Connection,
	table_name: String,
	embedder: Box<dyn Embedder>,
}

impl LanceDbIndexer {
	pub async fn new(db_path: &Path, table_name: &str, embedder: Box<dyn Embedder>) -> Result<Self> {
		let db = open_db(db_path.to_string_lossy().as_ref()).await?;
		Ok(Self { db, table_name: table_name.to_string(), embedder })
	}

	pub async fn index_documents(&self, docs: &[Document]) -> Result<usize> {
		let docs: Vec<&Document> = docs.iter().filter(|d| !d.content.trim().is_empty()).collect();
		if docs.is_empty() { tracing::warn!("no documents to index"); return Ok(0); }
		tracing::info!(documents = docs.len(), table = %self.table_name, "indexing into LanceDB");
		let pb = ProgressBar::new(docs.len() as u64);
		pb.set_style(ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} docs ({percent}%) {msg}")?.progress_chars("#>-"));
		for batch in docs.chunks(BATCH_SIZE) {
			let texts: Vec<String> = batch.iter().map(|d| d.content.clone()).collect();
			let vectors = self.embedder.embed_batch(&texts)?;
			if vectors.len() != batch.len() {
				return Err(anyhow!("embedder returned {} vectors for {} documents", vectors.len(), batch.len()));
			}
			self.insert_batch(batch, vectors).await?;
			pb.inc(batch.len() as u64);
		}
		pb.finish_with_message("done");
		tracing::info!(documents = docs.len(), table = %self.table_name, "LanceDB indexing completed");
		Ok(docs.len())
	}

	async fn insert_batch(&self, docs: &[&Document], vectors: Vec<Vec<f32>>) -> Result<()> {
		let record_batch = self.to_record_batch(docs, vectors)?;
		let schema = record_batch.schema();
		let reader = Box::new(RecordBatchIterator::new(vec![Ok(record_batch)].into_iter(), schema));
		if table_exists(&self.db, &self.table_name).await? {
			self.db.open_table(&self.table_name).execute().await?.add(reader).execute().await?;
		} else {
			self.db.create_table(&self.table_name, reader).execute().await?;
		}
		Ok(())
	}

	fn to_record_batch(&self, docs: &[&Document], vectors: Vec<Vec<f32>>) -> Result<RecordBatch> {
		let dim = i32::try_from(self.embedder.dim())?;
		let schema = build_arrow_schema(dim);
		let mut columns: Vec<ArrayRef> = Vec::with_capacity(METADATA_KEYS.len() + 3);
		columns.push(Arc::new(StringArray::from_iter_values(docs.iter().map(|d| d.content.as_str()))));
		for key in METADATA_KEYS {
			columns.push(Arc::new(StringArray::from_iter_values(docs.iter().map(|d| d.meta(key)))));
		}
		columns.push(Arc::new(StringArray::from_iter_values(docs.iter().map(|d| blake3::hash(d.content.as_bytes()).to_hex().to_string()))));
		let vectors = vectors.into_iter().map(|v| Some(v.into_iter().map(Some).collect::<Vec<_>>()));
		columns.push(Arc::new(FixedSizeListArray::from_iter_primitive::<arrow_array::types::Float32Type, _, _>(vectors, dim)));
		Ok(RecordBatch::try_new(schema, columns)?)
	}
}
