use std::collections::HashSet;

use docq_core::types::RetrievalHit;

/// Combine hit lists into one deduplicated ranking of at most `k` hits.
///
/// Lists are flattened in the order given. The first hit for a given content
/// wins; later duplicates are dropped whatever their score. When every kept hit
/// is scored and all come from one backend, the list is stably re-sorted by
/// score descending. Scores from different backends are not comparable, so
/// mixed-source lists keep their flattened order. A NaN score ranks below
/// every finite one.
pub fn merge<I>(hit_lists: I, k: usize) -> Vec<RetrievalHit>
where
    I: IntoIterator<Item = Vec<RetrievalHit>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<RetrievalHit> = Vec::new();
    for hit in hit_lists.into_iter().flatten() {
        if seen.insert(hit.document.content.clone()) {
            merged.push(hit);
        }
    }

    let all_scored = merged.iter().all(|h| h.score.is_some());
    let single_source = merged.windows(2).all(|w| w[0].source == w[1].source);
    if all_scored && single_source {
        merged.sort_by(|a, b| rank_key(b).total_cmp(&rank_key(a)));
    }
    merged.truncate(k);
    merged
}

fn rank_key(hit: &RetrievalHit) -> f32 { hit.score.filter(|s| !s.is_nan()).unwrap_or(f32::NEG_INFINITY) }

#[cfg(test)]
mod tests {
    use super::*;
    use docq_core::types::{Document, SourceKind};

    fn hit(content: &str, score: Option<f32>, source: SourceKind) -> RetrievalHit {
        RetrievalHit { document: Document::from_content(content), score, source }
    }

    fn v(content: &str, score: f32) -> RetrievalHit { hit(content, Some(score), SourceKind::Vector) }

    fn contents(hits: &[RetrievalHit]) -> Vec<&str> { hits.iter().map(|h| h.content()).collect() }

    #[test]
    fn first_occurrence_wins_then_resort() {
        let merged = merge(vec![vec![v("doc A", 0.9), v("doc B", 0.5)], vec![v("doc B", 0.8), v("doc C", 0.3)]], 3);
        assert_eq!(contents(&merged), ["doc A", "doc B", "doc C"]);
        assert_eq!(merged[1].score, Some(0.5), "doc B keeps its first-seen score");
    }

    #[test]
    fn resorts_descending_and_stable_on_ties() {
        let merged = merge(vec![vec![v("a", 0.2), v("b", 0.7)], vec![v("c", 0.7), v("d", 0.9)]], 10);
        assert_eq!(contents(&merged), ["d", "b", "c", "a"]);
    }

    #[test]
    fn nan_score_sorts_last() {
        let merged = merge(vec![vec![v("a", 0.2), v("zero-vector doc", f32::NAN), v("b", 0.9)]], 10);
        assert_eq!(contents(&merged), ["b", "a", "zero-vector doc"]);
        let merged = merge(vec![vec![v("x", f32::NAN), v("y", 0.1)], vec![v("z", 0.5), v("w", f32::NAN)]], 10);
        assert_eq!(contents(&merged), ["z", "y", "x", "w"]);
    }

    #[test]
    fn any_unscored_hit_keeps_flattened_order() {
        let merged = merge(
            vec![vec![v("a", 0.1), hit("b", None, SourceKind::Vector)], vec![v("c", 0.9)]],
            10,
        );
        assert_eq!(contents(&merged), ["a", "b", "c"]);
    }

    #[test]
    fn mixed_sources_keep_flattened_order() {
        let merged = merge(
            vec![vec![hit("lex", Some(12.0), SourceKind::Lexical)], vec![v("vec", 0.99), v("lex", 0.98)]],
            10,
        );
        assert_eq!(contents(&merged), ["lex", "vec"]);
        assert_eq!(merged[0].source, SourceKind::Lexical);
    }

    #[test]
    fn truncates_without_padding() {
        assert_eq!(merge(vec![vec![v("a", 1.0), v("b", 0.5), v("c", 0.1)]], 2).len(), 2);
        assert_eq!(merge(vec![vec![v("a", 1.0)], vec![v("a", 1.0)]], 5).len(), 1);
        assert!(merge(Vec::<Vec<RetrievalHit>>::new(), 3).is_empty());
    }
}
