//! docq-text
//!
//! Tantivy-backed lexical index: `index` builds it from corpus documents,
//! `search` serves it through the `LexicalIndex` trait.

pub mod tantivy_utils;
pub mod index;
pub mod search;

pub use index::TantivyIndexer;
pub use search::TantivyLexicalIndex;
