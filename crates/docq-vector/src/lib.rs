//! docq-vector
//!
//! LanceDB-backed vector store: `writer` embeds and appends corpus documents,
//! `search` serves nearest-neighbour queries through the `VectorStore` trait.

pub mod schema;
pub mod search;
pub mod table;
pub mod writer;

pub use search::LanceVectorStore;
pub use writer::LanceDbIndexer;
