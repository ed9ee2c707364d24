use anyhow::{anyhow, Result};
use arrow_array::{Array, Float32Array, RecordBatch, StringArray};
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{DistanceType, Table};
use std::path::Path;

use docq_core::traits::{Embedder, VectorStore};
use docq_core::types::{Document, Meta, METADATA_KEYS};

use crate::schema::CONTENT_COL;
use crate::table::{open_db, table_exists};

/// Read-only similarity search over a LanceDB table.
///
/// Queries use cosine distance, so `1 - _distance` is the cosine similarity.
pub struct LanceVectorStore {
	table: Table,
	embedder: Box<dyn Embedder>,
}

impl LanceVectorStore {
	pub async fn open(db_path: &Path, table_name: &str, embedder: Box<dyn Embedder>) -> Result<Self> {
		let db = open_db(db_path.to_string_lossy().as_ref()).await?;
		let table = db.open_table(table_name).execute().await?;
		Ok(Self { table, embedder })
	}

	/// `Ok(None)` when the database or table has not been created yet.
	pub async fn open_if_exists(db_path: &Path, table_name: &str, embedder: Box<dyn Embedder>) -> Result<Option<Self>> {
		if !db_path.exists() { return Ok(None); }
		let db = open_db(db_path.to_string_lossy().as_ref()).await?;
		if !table_exists(&db, table_name).await? {
			tracing::info!(table = table_name, "no LanceDB table present");
			return Ok(None);
		}
		let table = db.open_table(table_name).execute().await?;
		Ok(Some(Self { table, embedder }))
	}

	pub async fn count_rows(&self) -> Result<usize> { Ok(self.table.count_rows(None).await?) }

	async fn nearest(&self, query: &str, k: usize) -> Result<Vec<(Document, f32)>> {
		let query_embedding = self.embedder.embed_text(query)?;
		let mut stream = self.table
			.vector_search(query_embedding)?
			.distance_type(DistanceType::Cosine)
			.limit(k)
			.execute()
			.await?;
		let mut hits = Vec::new();
		while let Some(batch) = stream.try_next().await? {
			read_batch(&batch, &mut hits)?;
		}
		Ok(hits)
	}
}

fn string_col<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
	batch
		.column_by_name(name)
		.and_then(|c| c.as_any().downcast_ref::<StringArray>())
		.ok_or_else(|| anyhow!("column '{}' missing or not utf8", name))
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<(Document, f32)>) -> Result<()> {
	let content = string_col(batch, CONTENT_COL)?;
	let mut meta_cols = Vec::with_capacity(METADATA_KEYS.len());
	for key in METADATA_KEYS {
		meta_cols.push((key, batch.column_by_name(key).and_then(|c| c.as_any().downcast_ref::<StringArray>())));
	}
	let distance = batch
		.column_by_name("_distance")
		.and_then(|c| c.as_any().downcast_ref::<Float32Array>())
		.ok_or_else(|| anyhow!("_distance column missing"))?;
	for i in 0..batch.num_rows() {
		let mut metadata = Meta::new();
		for (key, col) in &meta_cols {
			let value = col.filter(|c| !c.is_null(i)).map_or("", |c| c.value(i));
			metadata.insert((*key).to_string(), value.to_string());
		}
		out.push((Document::new(content.value(i), metadata), 1.0 - distance.value(i)));
	}
	Ok(())
}

impl VectorStore for LanceVectorStore {
	async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
		Ok(self.nearest(query, k).await?.into_iter().map(|(d, _)| d).collect())
	}

	async fn similarity_search_with_score(&self, query: &str, k: usize) -> Result<Vec<(Document, f32)>> {
		self.nearest(query, k).await
	}
}
