//! docq-hybrid
//!
//! The query-retrieval orchestrator: routes each query to the lexical index,
//! the vector store, or both, and merges the results into one ranking.

pub mod adapters;
pub mod backends;
pub mod merge;
pub mod orchestrator;

pub use adapters::{LexicalAdapter, VectorAdapter};
pub use backends::Backends;
pub use merge::merge;
pub use orchestrator::{Orchestrator, QueryPlan};
