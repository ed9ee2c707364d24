use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

use docq_core::types::METADATA_KEYS;

pub const CONTENT_COL: &str = "content";
pub const CONTENT_HASH_COL: &str = "content_hash";
pub const VECTOR_COL: &str = "vector";

/// `content`, the metadata columns, `content_hash`, then a `dim`-wide vector.
pub fn build_arrow_schema(dim: i32) -> Arc<Schema> {
	let mut fields = vec![Field::new(CONTENT_COL, DataType::Utf8, false)];
	for key in METADATA_KEYS {
		fields.push(Field::new(key, DataType::Utf8, false));
	}
	fields.push(Field::new(CONTENT_HASH_COL, DataType::Utf8, false));
	fields.push(Field::new(VECTOR_COL, DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), dim), true));
	Arc::new(Schema::new(fields))
}
