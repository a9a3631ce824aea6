//! Query engine composing retrieval, glossary, and market-data signals.
//!
//! The [`QueryEngine`] owns the read-only state built at startup (embedding
//! index, glossary, market snapshot) and answers queries without mutating
//! any of it, so one engine can serve concurrent requests behind an `Arc`
//! with no locking.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use finrag_core::{HashingEmbedder, QueryEngine};
//!
//! let engine = QueryEngine::builder()
//!     .embedding_provider(Arc::new(HashingEmbedder::default()))
//!     .documents(documents)
//!     .glossary(glossary)
//!     .market_data(market)
//!     .build()
//!     .await?;
//!
//! let response = engine.handle_query("What is inflation?", &[]).await;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::config::EngineConfig;
use crate::document::{ChatTurn, Document, RankedDocument, Response};
use crate::embedding::EmbeddingProvider;
use crate::error::{EngineError, Result};
use crate::glossary::Glossary;
use crate::index::EmbeddingIndex;
use crate::market::MarketData;
use crate::synthesis;

/// The query engine.
///
/// Construct one via [`QueryEngine::builder()`]; building embeds the whole
/// corpus, so a build failure is a startup failure and no request is ever
/// served by a partially initialized engine.
pub struct QueryEngine {
    config: EngineConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    index: EmbeddingIndex,
    glossary: Glossary,
    market: MarketData,
}

impl QueryEngine {
    /// Create a new [`QueryEngineBuilder`].
    pub fn builder() -> QueryEngineBuilder {
        QueryEngineBuilder::default()
    }

    /// Return a reference to the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of documents in the embedding index.
    pub fn document_count(&self) -> usize {
        self.index.len()
    }

    /// Answer a query.
    ///
    /// Never fails: any internal error degrades to a fixed apologetic
    /// response with empty metadata fields. `history` is accepted for
    /// interface compatibility but does not influence ranking or synthesis.
    pub async fn handle_query(&self, message: &str, _history: &[ChatTurn]) -> Response {
        match self.answer(message).await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "query processing failed, returning degraded response");
                synthesis::degraded_response()
            }
        }
    }

    /// Run ranking, glossary matching, and market extraction, then synthesize.
    async fn answer(&self, message: &str) -> Result<Response> {
        // 1. Embed the query and rank the corpus
        let query_embedding = self.embedder.embed(message).await.map_err(|e| {
            EngineError::PipelineError(format!("query embedding failed: {e}"))
        })?;
        let ranked = self.index.rank(&query_embedding, self.config.top_k);

        // 2. Drop results below the score threshold
        let threshold = self.config.similarity_threshold;
        let ranked: Vec<RankedDocument> =
            ranked.into_iter().filter(|r| r.score >= threshold).collect();

        // 3. Scan the same query for glossary terms and market triggers
        let glossary_terms = self.glossary.find_terms(message, self.config.max_glossary_terms);
        let market_data = self.market.extract(message);

        info!(
            ranked = ranked.len(),
            glossary_terms = glossary_terms.len(),
            market_labels = market_data.len(),
            "query signals collected"
        );

        // 4. Merge into one response
        Ok(synthesis::synthesize(ranked, glossary_terms, market_data, self.config.snippet_limit))
    }
}

/// Builder for constructing a [`QueryEngine`].
///
/// The embedding provider is required; config, documents, glossary, and
/// market data default to empty. [`build()`](QueryEngineBuilder::build)
/// embeds the corpus with the configured provider.
#[derive(Default)]
pub struct QueryEngineBuilder {
    config: Option<EngineConfig>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    documents: Vec<Document>,
    glossary: Option<Glossary>,
    market: Option<MarketData>,
}

impl QueryEngineBuilder {
    /// Set the engine configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider used for both corpus and queries.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(provider);
        self
    }

    /// Set the document collection to index.
    pub fn documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    /// Set the glossary.
    pub fn glossary(mut self, glossary: Glossary) -> Self {
        self.glossary = Some(glossary);
        self
    }

    /// Set the market snapshot and trends.
    pub fn market_data(mut self, market: MarketData) -> Self {
        self.market = Some(market);
        self
    }

    /// Build the [`QueryEngine`], embedding the document collection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigError`] if no embedding provider was set,
    /// or the index build error if corpus embedding fails.
    pub async fn build(self) -> Result<QueryEngine> {
        let config = self.config.unwrap_or_default();
        let embedder = self.embedder.ok_or_else(|| {
            EngineError::ConfigError("embedding_provider is required".to_string())
        })?;

        let index = EmbeddingIndex::build(embedder.as_ref(), self.documents).await?;

        Ok(QueryEngine {
            config,
            embedder,
            index,
            glossary: self.glossary.unwrap_or_default(),
            market: self.market.unwrap_or_default(),
        })
    }
}
