//! docq-query
//!
//! Query understanding: normalization (`preprocess`), retrieval-affinity
//! classification (`classify`) and synonym expansion (`expand`). All pure.

pub mod classify;
pub mod expand;
pub mod preprocess;

pub use classify::{Classifier, CueScores};
pub use expand::Expander;
pub use preprocess::Preprocessor;
