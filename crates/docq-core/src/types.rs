//! Domain types shared by the retrieval backends and the orchestrator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type Meta = BTreeMap<String, String>;

/// Metadata keys every surfaced document carries, empty when unknown.
pub const METADATA_KEYS: [&str; 4] = ["headingTrace", "pageTrace", "page_id", "section_id"];

/// A retrievable unit of the knowledge base.
///
/// - `content`: the text payload, also the deduplication key
/// - `metadata`: string attributes; the keys in [`METADATA_KEYS`] are always present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: Meta,
}

impl Document {
    /// Build a document, filling any missing recognized metadata key with `""`.
    pub fn new(content: impl Into<String>, mut metadata: Meta) -> Self {
        for key in METADATA_KEYS {
            metadata.entry(key.to_string()).or_default();
        }
        Self { content: content.into(), metadata }
    }

    pub fn from_content(content: impl Into<String>) -> Self { Self::new(content, Meta::new()) }

    pub fn meta(&self, key: &str) -> &str { self.metadata.get(key).map_or("", String::as_str) }
}

/// Indicates which backend produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Lexical,
    Vector,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Lexical => f.write_str("lexical"),
            SourceKind::Vector => f.write_str("vector"),
        }
    }
}

/// One retrieved document as seen by the merger.
///
/// `score` is backend-local: lexical relevance is unbounded, vector similarity
/// is `1 - distance`. Higher is better for both. Unscored retrieval leaves it `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalHit {
    pub document: Document,
    pub score: Option<f32>,
    pub source: SourceKind,
}

impl RetrievalHit {
    pub fn scored(document: Document, score: f32, source: SourceKind) -> Self {
        Self { document, score: Some(score), source }
    }

    pub fn unscored(document: Document, source: SourceKind) -> Self {
        Self { document, score: None, source }
    }

    pub fn content(&self) -> &str { &self.document.content }
}

/// Retrieval affinity of a query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QueryClassification {
    Factual,
    Semantic,
    Hybrid,
}

impl fmt::Display for QueryClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryClassification::Factual => f.write_str("factual"),
            QueryClassification::Semantic => f.write_str("semantic"),
            QueryClassification::Hybrid => f.write_str("hybrid"),
        }
    }
}

/// Caller override for branch selection. `Auto` defers to the classifier.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Auto,
    Factual,
    Semantic,
    Hybrid,
}

impl SearchMode {
    /// The branch this mode forces, or `None` for `Auto`.
    pub fn forced(self) -> Option<QueryClassification> {
        match self {
            SearchMode::Auto => None,
            SearchMode::Factual => Some(QueryClassification::Factual),
            SearchMode::Semantic => Some(QueryClassification::Semantic),
            SearchMode::Hybrid => Some(QueryClassification::Hybrid),
        }
    }
}

impl FromStr for SearchMode {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(SearchMode::Auto),
            "factual" => Ok(SearchMode::Factual),
            "semantic" => Ok(SearchMode::Semantic),
            "hybrid" => Ok(SearchMode::Hybrid),
            other => Err(crate::error::Error::InvalidArgument(format!("unknown search mode '{other}'"))),
        }
    }
}

/// Ordered query variants; the first element is always the input query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionSet(Vec<String>);

impl ExpansionSet {
    pub fn single(query: impl Into<String>) -> Self { Self(vec![query.into()]) }

    /// Build from an original and an optional expanded variant. An expanded
    /// variant equal to the original is dropped.
    pub fn with_variant(original: impl Into<String>, expanded: String) -> Self {
        let original = original.into();
        if expanded == original { Self(vec![original]) } else { Self(vec![original, expanded]) }
    }

    pub fn original(&self) -> &str { &self.0[0] }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, String> { self.0.iter() }
    pub fn as_slice(&self) -> &[String] { &self.0 }
}

impl<'a> IntoIterator for &'a ExpansionSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Record handed to the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub content: String,
    pub metadata: Meta,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<SourceKind>,
}

impl From<RetrievalHit> for SearchRecord {
    /// Non-finite scores (a zero query vector gives NaN) are left out.
    fn from(hit: RetrievalHit) -> Self {
        let score = hit.score.filter(|s| s.is_finite());
        Self { content: hit.document.content, metadata: hit.document.metadata, score, source: Some(hit.source) }
    }
}

/// A sub-branch that failed while the other one produced results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialFailure {
    pub source: SourceKind,
    pub message: String,
}

/// Full orchestration result: ranked records plus any partial-failure warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub classification: QueryClassification,
    pub results: Vec<SearchRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<PartialFailure>,
}

impl SearchResponse {
    pub fn is_partial(&self) -> bool { !self.warnings.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_fills_recognized_metadata() {
        let mut meta = Meta::new();
        meta.insert("page_id".into(), "intro".into());
        let doc = Document::new("hello", meta);
        for key in METADATA_KEYS { assert!(doc.metadata.contains_key(key), "missing {key}"); }
        assert_eq!(doc.meta("page_id"), "intro");
        assert_eq!(doc.meta("headingTrace"), "");
    }

    #[test]
    fn search_mode_parses_case_insensitively() {
        assert_eq!("Hybrid".parse::<SearchMode>().expect("mode"), SearchMode::Hybrid);
        assert_eq!("".parse::<SearchMode>().expect("mode"), SearchMode::Auto);
        assert!("fuzzy".parse::<SearchMode>().is_err());
        assert_eq!(SearchMode::Auto.forced(), None);
        assert_eq!(SearchMode::Semantic.forced(), Some(QueryClassification::Semantic));
    }

    #[test]
    fn expansion_set_drops_identical_variant() {
        let set = ExpansionSet::with_variant("api", "api".to_string());
        assert_eq!(set.len(), 1);
        let set = ExpansionSet::with_variant("api", "api endpoint".to_string());
        assert_eq!(set.as_slice(), &["api".to_string(), "api endpoint".to_string()]);
    }

    #[test]
    fn record_omits_missing_score() {
        let hit = RetrievalHit::unscored(Document::from_content("x"), SourceKind::Vector);
        let json = serde_json::to_value(SearchRecord::from(hit)).expect("json");
        assert!(json.get("score").is_none());
        assert_eq!(json["source"], "vector");
        assert_eq!(json["metadata"]["section_id"], "");
    }

    #[test]
    fn record_omits_nan_score() {
        let hit = RetrievalHit::scored(Document::from_content("x"), f32::NAN, SourceKind::Vector);
        let record = SearchRecord::from(hit);
        assert_eq!(record.score, None);
        let json = serde_json::to_value(&record).expect("json");
        assert!(json.get("score").is_none());
    }
}
