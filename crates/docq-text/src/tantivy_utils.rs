use tantivy::schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING};
use tantivy::tokenizer::{Language, LowerCaser, SimpleTokenizer, StopWordFilter, Stemmer, TextAnalyzer};
use tantivy::Index;

use docq_core::types::METADATA_KEYS;

pub const CONTENT_FIELD: &str = "content";
pub const ANALYZER_NAME: &str = "content_en";

pub fn build_schema() -> Schema {
	let mut schema_builder = Schema::builder();
	let text_field_indexing = TextFieldIndexing::default().set_tokenizer(ANALYZER_NAME).set_index_option(IndexRecordOption::WithFreqsAndPositions);
	let text_options = TextOptions::default().set_indexing_options(text_field_indexing).set_stored();
	schema_builder.add_text_field(CONTENT_FIELD, text_options);
	for key in METADATA_KEYS {
		schema_builder.add_text_field(key, STRING | STORED);
	}
	schema_builder.build()
}

pub fn register_tokenizer(index: &Index) {
	let stop_words = [
		"a","an","and","are","as","at","be","by","for","from","has","he","in","is","it","its","of","on","that","the","to","was","will","with","or","but","not","this","these","they","them","their","there","then","than","so","if","when","where","why","how","what","which","who","whom","whose","can","could","should","would","may","might","must","shall","do","does","did","have","had","having",
	];
	let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(LowerCaser)
		.filter(StopWordFilter::remove(stop_words.into_iter().map(|s| s.to_string())))
		.filter(Stemmer::new(Language::English))
		.build();
	index.tokenizers().register(ANALYZER_NAME, tokenizer);
}

/// Content field plus the metadata fields, in `METADATA_KEYS` order.
pub struct DocFields {
	pub content: Field,
	pub metadata: Vec<(&'static str, Field)>,
}

impl DocFields {
	pub fn resolve(schema: &Schema) -> tantivy::Result<Self> {
		let content = schema.get_field(CONTENT_FIELD)?;
		let mut metadata = Vec::with_capacity(METADATA_KEYS.len());
		for key in METADATA_KEYS {
			metadata.push((key, schema.get_field(key)?));
		}
		Ok(Self { content, metadata })
	}
}
