//! Query normalization: lower-case, strip punctuation, drop stop words, lemmatize.

use std::collections::{HashMap, HashSet};

/// English stop words. `what`, `is`, `how` and `to` are deliberately absent:
/// they make up classifier cue phrases such as "what is" and "similar to".
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "which", "who", "whom", "this", "that", "these",
    "those", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "from", "up", "down", "in", "out", "on", "off",
    "over", "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn", "doesn",
    "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan", "shouldn", "wasn",
    "weren", "won", "wouldn",
];

/// Irregular plurals, plus words the suffix rules would mangle (mapped to themselves).
/// Every value must be a fixed point of the lemmatizer.
const LEMMA_EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("analyses", "analysis"),
    ("criteria", "criterion"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("cliches", "cliche"),
    ("headaches", "headache"),
    ("avalanches", "avalanche"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("zombies", "zombie"),
    ("postgres", "postgres"),
    ("bias", "bias"),
    ("biases", "bias"),
    ("canvas", "canvas"),
    ("canvases", "canvas"),
    ("alias", "alias"),
    ("aliases", "alias"),
    ("atlas", "atlas"),
    ("gas", "gas"),
    ("series", "series"),
    ("species", "species"),
    ("news", "news"),
    ("always", "always"),
    ("perhaps", "perhaps"),
    ("yes", "yes"),
    ("thus", "thus"),
    ("kubernetes", "kubernetes"),
];

pub struct Preprocessor {
    stop_words: HashSet<&'static str>,
    exceptions: HashMap<&'static str, &'static str>,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self { stop_words: STOP_WORDS.iter().copied().collect(), exceptions: LEMMA_EXCEPTIONS.iter().copied().collect() }
    }
}

impl Preprocessor {
    pub fn new() -> Self { Self::default() }

    /// Normalize `raw` into a space-joined token stream. Returns `""` when
    /// every token is filtered; callers fall back to the raw query then.
    pub fn preprocess(&self, raw: &str) -> String {
        let cleaned: String = raw
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
            .collect();
        cleaned
            .split_whitespace()
            .filter(|t| !self.is_stop_word(t))
            .map(|t| self.lemmatize(t))
            .filter(|t| !self.is_stop_word(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_stop_word(&self, token: &str) -> bool { self.stop_words.contains(token) }

    /// Reduce a token to its singular noun form. Non-ASCII or mixed tokens pass through.
    pub fn lemmatize(&self, token: &str) -> String {
        if let Some(lemma) = self.exceptions.get(token) {
            return (*lemma).to_string();
        }
        if !token.chars().all(|c| c.is_ascii_alphabetic()) {
            return token.to_string();
        }
        let stem = strip_plural(token);
        match self.exceptions.get(stem.as_str()) {
            Some(lemma) => (*lemma).to_string(),
            None => stem,
        }
    }
}

fn strip_plural(token: &str) -> String {
    let n = token.len();
    if n > 4 && token.ends_with("ies") {
        return format!("{}y", &token[..n - 3]);
    }
    if token.ends_with("sses") {
        return token[..n - 2].to_string();
    }
    if n > 4 && ["xes", "ches", "shes"].iter().any(|s| token.ends_with(s)) {
        return token[..n - 2].to_string();
    }
    if n > 3 && token.ends_with('s') {
        let before = token.as_bytes()[n - 2];
        if !matches!(before, b's' | b'u' | b'i') {
            return token[..n - 1].to_string();
        }
    }
    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_stop_words() {
        let p = Preprocessor::new();
        assert_eq!(p.preprocess("What is Authentication?"), "what is authentication");
        assert_eq!(p.preprocess("Show me the API-keys, please!"), "show api key please");
    }

    #[test]
    fn lemmatizes_plurals() {
        let p = Preprocessor::new();
        assert_eq!(p.lemmatize("queries"), "query");
        assert_eq!(p.lemmatize("classes"), "class");
        assert_eq!(p.lemmatize("boxes"), "box");
        assert_eq!(p.lemmatize("matches"), "match");
        assert_eq!(p.lemmatize("documents"), "document");
        assert_eq!(p.lemmatize("status"), "status");
        assert_eq!(p.lemmatize("analysis"), "analysis");
        assert_eq!(p.lemmatize("children"), "child");
        assert_eq!(p.lemmatize("v2s"), "v2s");
    }

    #[test]
    fn singular_lookalikes_keep_their_form() {
        let p = Preprocessor::new();
        for (word, lemma) in [
            ("postgres", "postgres"),
            ("bias", "bias"),
            ("canvas", "canvas"),
            ("movies", "movie"),
            ("niches", "niche"),
            ("aliases", "alias"),
        ] {
            assert_eq!(p.lemmatize(word), lemma, "{word}");
            assert_eq!(p.lemmatize(lemma), lemma, "{lemma} is a fixed point");
        }
        assert_eq!(p.lemmatize("ideas"), "idea");
        assert_eq!(p.lemmatize("searches"), "search");
    }

    #[test]
    fn all_filtered_yields_empty() {
        let p = Preprocessor::new();
        assert_eq!(p.preprocess("the and of"), "");
        assert_eq!(p.preprocess("?!..."), "");
        assert_eq!(p.preprocess(""), "");
    }

    #[test]
    fn cue_phrases_survive() {
        let p = Preprocessor::new();
        assert_eq!(p.preprocess("How to set things up"), "how to set thing");
        assert_eq!(p.preprocess("something similar to dashboards"), "something similar to dashboard");
    }

    #[test]
    fn idempotent_and_deterministic() {
        let p = Preprocessor::new();
        let samples = [
            "What is authentication?",
            "Compare the databases & their indices",
            "Steps for API setup (v2) -- children's analyses",
            "Ünïcode façades: naïve cafés",
            "buses passes glasses caches series",
            "Postgres bias on canvas: movies, niches and aliases",
            "snake_case_names and tabs\tand\nnewlines",
            "   ",
        ];
        for s in samples {
            let once = p.preprocess(s);
            assert_eq!(p.preprocess(&once), once, "not idempotent for {s:?}");
            assert_eq!(p.preprocess(s), once, "not deterministic for {s:?}");
        }
    }
}
