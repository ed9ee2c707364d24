//! Uniform retrieval surface over the lexical index and the vector store.
//!
//! Adapters translate backend-native results into [`RetrievalHit`]s, tag the
//! source, and drop records whose content is empty. A missing backend yields
//! [`Error::NotReady`]; nothing is rebuilt at query time.

use std::sync::Arc;

use docq_core::error::{Error, Result};
use docq_core::traits::{LexicalIndex, VectorStore};
use docq_core::types::{Document, RetrievalHit, SourceKind};

fn check_k(k: usize) -> Result<()> {
    if k == 0 { return Err(Error::InvalidArgument("k must be > 0".into())); }
    Ok(())
}

fn into_hits(raw: impl IntoIterator<Item = (Document, Option<f32>)>, source: SourceKind) -> Vec<RetrievalHit> {
    let mut hits = Vec::new();
    for (document, score) in raw {
        if document.content.trim().is_empty() {
            tracing::warn!(%source, "dropping retrieved record with empty content");
            continue;
        }
        hits.push(RetrievalHit { document, score, source });
    }
    hits
}

pub struct LexicalAdapter<L> {
    index: Option<Arc<L>>,
}

impl<L> Clone for LexicalAdapter<L> {
    fn clone(&self) -> Self { Self { index: self.index.clone() } }
}

impl<L: LexicalIndex> LexicalAdapter<L> {
    pub fn new(index: Option<Arc<L>>) -> Self { Self { index } }

    pub fn is_ready(&self) -> bool { self.index.is_some() }

    /// Ranked lexical hits. The index is synchronous, so the call runs on the
    /// blocking pool to keep concurrent vector calls progressing.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>> {
        let index = self.index.clone().ok_or(Error::NotReady(SourceKind::Lexical))?;
        check_k(k)?;
        let q = query.to_string();
        let raw = tokio::task::spawn_blocking(move || index.search(&q, k))
            .await
            .map_err(|e| Error::backend(SourceKind::Lexical, e))?
            .map_err(|e| Error::backend(SourceKind::Lexical, format!("{e:#}")))?;
        tracing::debug!(query, k, hits = raw.len(), "lexical retrieve");
        Ok(into_hits(raw.into_iter().map(|(d, s)| (d, Some(s))), SourceKind::Lexical))
    }
}

pub struct VectorAdapter<V> {
    store: Option<Arc<V>>,
}

impl<V> Clone for VectorAdapter<V> {
    fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<V: VectorStore> VectorAdapter<V> {
    pub fn new(store: Option<Arc<V>>) -> Self { Self { store } }

    pub fn is_ready(&self) -> bool { self.store.is_some() }

    fn store(&self) -> Result<&V> { self.store.as_deref().ok_or(Error::NotReady(SourceKind::Vector)) }

    /// Scored mode; required wherever results are merged by rank.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>> {
        let store = self.store()?;
        check_k(k)?;
        let raw = store
            .similarity_search_with_score(query, k)
            .await
            .map_err(|e| Error::backend(SourceKind::Vector, format!("{e:#}")))?;
        tracing::debug!(query, k, hits = raw.len(), "vector retrieve");
        Ok(into_hits(raw.into_iter().map(|(d, s)| (d, Some(s))), SourceKind::Vector))
    }

    pub async fn retrieve_unscored(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>> {
        let store = self.store()?;
        check_k(k)?;
        let raw = store
            .similarity_search(query, k)
            .await
            .map_err(|e| Error::backend(SourceKind::Vector, format!("{e:#}")))?;
        Ok(into_hits(raw.into_iter().map(|d| (d, None)), SourceKind::Vector))
    }
}
