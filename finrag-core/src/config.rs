//! Configuration for the query engine.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Configuration parameters for the query engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Number of top results to keep from vector ranking.
    pub top_k: usize,
    /// Minimum score for ranked documents (results below this are dropped).
    pub similarity_threshold: f32,
    /// Maximum number of glossary matches reported per query.
    pub max_glossary_terms: usize,
    /// Maximum characters of top-document content used as the answer lead.
    pub snippet_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { top_k: 3, similarity_threshold: 0.0, max_glossary_terms: 2, snippet_limit: 300 }
    }
}

impl EngineConfig {
    /// Create a new builder for constructing an [`EngineConfig`].
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the number of top results to keep from vector ranking.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the minimum score for ranked documents.
    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Set the maximum number of glossary matches reported per query.
    pub fn max_glossary_terms(mut self, limit: usize) -> Self {
        self.config.max_glossary_terms = limit;
        self
    }

    /// Set the maximum characters of lead-paragraph content.
    pub fn snippet_limit(mut self, limit: usize) -> Self {
        self.config.snippet_limit = limit;
        self
    }

    /// Build the [`EngineConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigError`] if `top_k`, `max_glossary_terms`,
    /// or `snippet_limit` is zero.
    pub fn build(self) -> Result<EngineConfig> {
        if self.config.top_k == 0 {
            return Err(EngineError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if self.config.max_glossary_terms == 0 {
            return Err(EngineError::ConfigError(
                "max_glossary_terms must be greater than zero".to_string(),
            ));
        }
        if self.config.snippet_limit == 0 {
            return Err(EngineError::ConfigError(
                "snippet_limit must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::builder().build().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn zero_top_k_is_rejected() {
        assert!(EngineConfig::builder().top_k(0).build().is_err());
    }

    #[test]
    fn zero_glossary_cap_is_rejected() {
        assert!(EngineConfig::builder().max_glossary_terms(0).build().is_err());
    }
}
