use std::sync::Arc;

use docq_core::traits::{LexicalIndex, VectorStore};
use docq_core::types::SourceKind;

use crate::adapters::{LexicalAdapter, VectorAdapter};

/// Process-wide retrieval backends.
///
/// Built once with [`Backends::init`] before serving and handed to each
/// [`crate::Orchestrator`] by reference. Either backend may be absent; the
/// matching adapter then reports `NotReady`. [`Backends::shutdown`] releases
/// this handle's references; a backend is closed once the last orchestrator
/// holding it is dropped.
pub struct Backends<L, V> {
    lexical: Option<Arc<L>>,
    vector: Option<Arc<V>>,
}

impl<L: LexicalIndex, V: VectorStore> Backends<L, V> {
    pub fn init(lexical: Option<L>, vector: Option<V>) -> Self {
        let backends = Self { lexical: lexical.map(Arc::new), vector: vector.map(Arc::new) };
        tracing::info!(
            lexical_ready = backends.is_ready(SourceKind::Lexical),
            vector_ready = backends.is_ready(SourceKind::Vector),
            "retrieval backends initialized"
        );
        backends
    }

    pub fn is_ready(&self, source: SourceKind) -> bool {
        match source {
            SourceKind::Lexical => self.lexical.is_some(),
            SourceKind::Vector => self.vector.is_some(),
        }
    }

    pub fn lexical_adapter(&self) -> LexicalAdapter<L> { LexicalAdapter::new(self.lexical.clone()) }

    pub fn vector_adapter(&self) -> VectorAdapter<V> { VectorAdapter::new(self.vector.clone()) }

    pub fn shutdown(&mut self) {
        let lexical = self.lexical.take().is_some();
        let vector = self.vector.take().is_some();
        tracing::info!(lexical, vector, "retrieval backends released");
    }
}
