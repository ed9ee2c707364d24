use std::future::Future;

use crate::types::Document;

pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;

    fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("embedder returned no vector"))
    }
}

/// Prebuilt term-frequency index over the static corpus.
///
/// Results come back best-first with an unbounded relevance score.
pub trait LexicalIndex: Send + Sync + 'static {
    fn search(&self, query: &str, k: usize) -> anyhow::Result<Vec<(Document, f32)>>;
}

/// Embedding-indexed similarity store.
///
/// Scores returned by `similarity_search_with_score` are similarities
/// (higher is better); stores that report distances invert them first.
pub trait VectorStore: Send + Sync + 'static {
    fn similarity_search(&self, query: &str, k: usize) -> impl Future<Output = anyhow::Result<Vec<Document>>> + Send;

    fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
    ) -> impl Future<Output = anyhow::Result<Vec<(Document, f32)>>> + Send;
}
