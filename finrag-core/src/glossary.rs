//! Glossary term matching over incoming queries.

use std::collections::HashMap;

use indexmap::IndexMap;

/// A term → definition lookup with longest-match preference.
///
/// Terms are stored lower-cased. Candidate order is fixed at construction:
/// character length descending, then lexicographic, so equal-length ties are
/// deterministic. Matching is pure substring containment, with no stemming
/// or fuzzy matching.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    // Sorted longest-first at construction.
    terms: Vec<(String, String)>,
}

impl Glossary {
    /// Build a glossary from term → definition entries.
    pub fn new(entries: HashMap<String, String>) -> Self {
        let mut terms: Vec<(String, String)> = entries
            .into_iter()
            .map(|(term, definition)| (term.to_lowercase(), definition))
            .collect();
        terms.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });
        Self { terms }
    }

    /// Number of glossary entries.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the glossary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Return terms contained in the query, longest first, capped at `limit`.
    ///
    /// A term matches if it appears anywhere in the lower-cased query.
    /// Iteration stops as soon as `limit` matches have been accumulated;
    /// further eligible terms are dropped.
    pub fn find_terms(&self, query: &str, limit: usize) -> IndexMap<String, String> {
        let query = query.to_lowercase();
        let mut found = IndexMap::new();
        for (term, definition) in &self.terms {
            if query.contains(term.as_str()) {
                found.insert(term.clone(), definition.clone());
                if found.len() >= limit {
                    break;
                }
            }
        }
        found
    }
}
