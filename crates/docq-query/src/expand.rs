use docq_core::types::ExpansionSet;

/// Domain term → synonyms, in insertion order.
pub const TERM_EXPANSIONS: &[(&str, &[&str])] = &[
    ("api", &["endpoint", "rest", "request", "response", "http"]),
    ("authentication", &["auth", "login", "credentials", "token", "api key"]),
    ("database", &["pgvector", "postgresql", "sql", "vector", "index"]),
    ("embedding", &["vector", "encoding", "representation", "similarity"]),
    ("setup", &["installation", "configuration", "initialize", "configure"]),
    ("document", &["content", "text", "file", "csv", "pdf"]),
];

pub struct Expander {
    table: &'static [(&'static str, &'static [&'static str])],
}

impl Default for Expander {
    fn default() -> Self { Self { table: TERM_EXPANSIONS } }
}

impl Expander {
    pub fn new() -> Self { Self::default() }

    pub fn synonyms(&self, term: &str) -> Option<&'static [&'static str]> {
        self.table.iter().find(|(key, _)| *key == term).map(|(_, syns)| *syns)
    }

    /// Produce `[query]` or `[query, query + " " + synonyms]`.
    ///
    /// For every whitespace token that is a table key, up to `max_terms_per_hit`
    /// synonyms are appended, tokens left to right.
    pub fn expand(&self, query: &str, max_terms_per_hit: usize) -> ExpansionSet {
        let mut extra: Vec<&str> = Vec::new();
        for token in query.split_whitespace() {
            if let Some(syns) = self.synonyms(&token.to_lowercase()) {
                extra.extend(syns.iter().take(max_terms_per_hit));
            }
        }
        if extra.is_empty() {
            return ExpansionSet::single(query);
        }
        tracing::debug!(query, added = extra.len(), "expanded query");
        ExpansionSet::with_variant(query, format!("{} {}", query, extra.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_returns_original_only() {
        let set = Expander::new().expand("something similar to dashboard", 2);
        assert_eq!(set.as_slice(), &["something similar to dashboard".to_string()]);
    }

    #[test]
    fn appends_synonyms_in_token_order() {
        let set = Expander::new().expand("api setup", 2);
        assert_eq!(set.len(), 2);
        assert_eq!(set.original(), "api setup");
        assert_eq!(set.as_slice()[1], "api setup endpoint rest installation configuration");
    }

    #[test]
    fn bounded_by_max_terms() {
        let set = Expander::new().expand("authentication", 10);
        assert_eq!(set.as_slice()[1], "authentication auth login credentials token api key");
        let set = Expander::new().expand("api", 0);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn lookup_is_case_insensitive_but_keeps_query() {
        let set = Expander::new().expand("Database tuning", 1);
        assert_eq!(set.as_slice()[1], "Database tuning pgvector");
    }
}
