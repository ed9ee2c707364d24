//! Query routing: preprocess → classify → {factual | semantic | hybrid} → merge.

use std::time::Duration;

use docq_core::config::SearchSettings;
use docq_core::error::{Error, Result};
use docq_core::traits::{LexicalIndex, VectorStore};
use docq_core::types::{
    ExpansionSet, PartialFailure, QueryClassification, RetrievalHit, SearchMode, SearchRecord, SearchResponse, SourceKind,
};
use docq_query::{Classifier, Expander, Preprocessor};

use crate::adapters::{LexicalAdapter, VectorAdapter};
use crate::backends::Backends;
use crate::merge::merge;

/// How a query will be served, decided before any backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub normalized: String,
    /// Text sent to the backends: the normalized query, or the trimmed raw
    /// query when normalization filtered everything.
    pub effective: String,
    pub classification: QueryClassification,
}

pub struct Orchestrator<L, V> {
    preprocessor: Preprocessor,
    classifier: Classifier,
    expander: Expander,
    lexical: LexicalAdapter<L>,
    vector: VectorAdapter<V>,
    max_terms_per_hit: usize,
}

impl<L: LexicalIndex, V: VectorStore> Orchestrator<L, V> {
    pub fn new(backends: &Backends<L, V>, settings: &SearchSettings) -> Self {
        Self {
            preprocessor: Preprocessor::new(),
            classifier: Classifier::new(),
            expander: Expander::new(),
            lexical: backends.lexical_adapter(),
            vector: backends.vector_adapter(),
            max_terms_per_hit: settings.max_terms_per_hit,
        }
    }

    pub fn plan(&self, query: &str, mode: SearchMode) -> Result<QueryPlan> {
        let raw = query.trim();
        if raw.is_empty() {
            return Err(Error::InvalidArgument("query must not be empty".into()));
        }
        let normalized = self.preprocessor.preprocess(raw);
        let effective = if normalized.is_empty() { raw.to_string() } else { normalized.clone() };
        let classification = mode.forced().unwrap_or_else(|| self.classifier.classify(&effective));
        Ok(QueryPlan { normalized, effective, classification })
    }

    pub fn expansions(&self, query: &str) -> ExpansionSet { self.expander.expand(query, self.max_terms_per_hit) }

    /// Run one query end to end.
    ///
    /// In the hybrid branch a failure of one sub-branch is reported in
    /// `warnings` next to the other sub-branch's hits; it only becomes an
    /// error when both fail.
    pub async fn search(&self, query: &str, k: usize, mode: SearchMode) -> Result<SearchResponse> {
        if k == 0 {
            return Err(Error::InvalidArgument("k must be > 0".into()));
        }
        let plan = self.plan(query, mode)?;
        tracing::debug!(
            normalized = %plan.normalized,
            classification = %plan.classification,
            k,
            "routing query"
        );

        let (hits, warnings) = match plan.classification {
            QueryClassification::Factual => (self.factual(&plan.effective, k).await?, Vec::new()),
            QueryClassification::Semantic => (self.semantic(&plan.effective, k).await?, Vec::new()),
            QueryClassification::Hybrid => self.hybrid(&plan.effective, k).await?,
        };

        Ok(SearchResponse {
            classification: plan.classification,
            results: hits.into_iter().map(SearchRecord::from).collect(),
            warnings,
        })
    }

    /// [`Self::search`] bounded by an optional deadline. On expiry every
    /// in-flight retrieval is dropped and no partial results are returned.
    pub async fn search_with_deadline(
        &self,
        query: &str,
        k: usize,
        mode: SearchMode,
        deadline: Option<Duration>,
    ) -> Result<SearchResponse> {
        match deadline {
            Some(limit) => tokio::time::timeout(limit, self.search(query, k, mode))
                .await
                .map_err(|_| Error::DeadlineExceeded(limit))?,
            None => self.search(query, k, mode).await,
        }
    }

    async fn factual(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>> {
        let hits = self.lexical.retrieve(query, k).await?;
        Ok(merge([hits], k))
    }

    async fn semantic(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>> {
        let variants = self.expansions(query);
        // try_join_all yields results in variant order, not completion order.
        let lists = futures::future::try_join_all(variants.iter().map(|v| self.vector.retrieve(v, k))).await?;
        Ok(merge(lists, k))
    }

    async fn hybrid(&self, query: &str, k: usize) -> Result<(Vec<RetrievalHit>, Vec<PartialFailure>)> {
        let (lexical, semantic) = futures::join!(self.factual(query, k), self.semantic(query, k));
        match (lexical, semantic) {
            (Ok(lex), Ok(sem)) => Ok((merge([lex, sem], k), Vec::new())),
            (Ok(lex), Err(err)) => Ok((merge([lex], k), vec![partial(SourceKind::Vector, &err)])),
            (Err(err), Ok(sem)) => Ok((merge([sem], k), vec![partial(SourceKind::Lexical, &err)])),
            (Err(err), Err(other)) => {
                tracing::warn!(error = %other, "vector sub-branch failed as well");
                Err(err)
            }
        }
    }
}

fn partial(source: SourceKind, err: &Error) -> PartialFailure {
    tracing::warn!(%source, error = %err, "hybrid sub-branch failed; returning partial results");
    PartialFailure { source, message: err.to_string() }
}
