use docq_core::types::QueryClassification;

/// Definitional / how-to phrasing; favours lexical retrieval.
pub const FACTUAL_CUES: &[&str] = &[
    "what is", "how to", "define", "explain", "step", "procedure", "meaning", "definition", "example",
    "installation", "setup",
];

/// Comparison / similarity phrasing; favours vector retrieval.
pub const SEMANTIC_CUES: &[&str] = &[
    "similar to", "related", "like", "compare", "difference", "alternative", "best practice", "recommend",
    "suggest",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CueScores {
    pub factual: usize,
    pub semantic: usize,
}

pub struct Classifier {
    factual: &'static [&'static str],
    semantic: &'static [&'static str],
}

impl Default for Classifier {
    fn default() -> Self { Self { factual: FACTUAL_CUES, semantic: SEMANTIC_CUES } }
}

impl Classifier {
    pub fn new() -> Self { Self::default() }

    /// Count cues occurring as substrings of the lower-cased query.
    pub fn scores(&self, query: &str) -> CueScores {
        let q = query.to_lowercase();
        CueScores {
            factual: self.factual.iter().filter(|cue| q.contains(*cue)).count(),
            semantic: self.semantic.iter().filter(|cue| q.contains(*cue)).count(),
        }
    }

    pub fn classify(&self, query: &str) -> QueryClassification {
        let CueScores { factual, semantic } = self.scores(query);
        match factual.cmp(&semantic) {
            std::cmp::Ordering::Greater => QueryClassification::Factual,
            std::cmp::Ordering::Less => QueryClassification::Semantic,
            std::cmp::Ordering::Equal => QueryClassification::Hybrid,
        }
    }
}
