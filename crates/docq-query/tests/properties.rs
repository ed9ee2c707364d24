use docq_core::types::QueryClassification;
use docq_query::{Classifier, Expander, Preprocessor};

const SAMPLES: &[&str] = &[
    "What is authentication?",
    "How to configure the database",
    "something similar to dashboards",
    "API setup",
    "Compare embedding strategies and recommend one",
    "the of and",
    "Réglages: définir les étapes!",
    "authentication authentication",
    "",
    "   ",
    "steps for installation",
    "Parties, classes and boxes",
];

#[test]
fn preprocessing_is_idempotent_and_deterministic() {
    let p = Preprocessor::new();
    for q in SAMPLES {
        let once = p.preprocess(q);
        assert_eq!(p.preprocess(&once), once, "idempotent for {q:?}");
        assert_eq!(p.preprocess(q), once, "deterministic for {q:?}");
        assert_eq!(once, once.to_lowercase());
        assert!(!once.contains("  "));
    }
}

#[test]
fn classification_is_total_and_deterministic() {
    let p = Preprocessor::new();
    let c = Classifier::new();
    for q in SAMPLES {
        let normalized = p.preprocess(q);
        let first = c.classify(&normalized);
        assert_eq!(c.classify(&normalized), first);
    }
    assert_eq!(c.classify(""), QueryClassification::Hybrid);
}

#[test]
fn expansion_has_one_or_two_variants_led_by_input() {
    let p = Preprocessor::new();
    let e = Expander::new();
    for q in SAMPLES {
        let normalized = p.preprocess(q);
        for max in [0, 1, 2, 5] {
            let set = e.expand(&normalized, max);
            assert!((1..=2).contains(&set.len()), "{q:?} gave {set:?}");
            assert_eq!(set.original(), normalized);
            if set.len() == 2 {
                assert!(set.as_slice()[1].starts_with(&normalized));
                assert_ne!(set.as_slice()[1], normalized);
            }
        }
    }
}

#[test]
fn max_terms_bounds_added_synonyms() {
    let e = Expander::new();
    let set = e.expand("authentication database", 1);
    assert_eq!(set.as_slice()[1], "authentication database auth pgvector");
    assert_eq!(e.expand("authentication", 0).len(), 1);
}
