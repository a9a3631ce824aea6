//! # finrag-core
//!
//! The retrieval-and-blend pipeline behind the finrag finance answer
//! service: embedding-based document ranking combined with rule-based
//! glossary and market-data extraction, merged into a templated text answer.
//!
//! The crate is I/O-free by design. A loader supplies documents, glossary
//! entries, and the market snapshot; an [`EmbeddingProvider`] turns text into
//! vectors; the [`QueryEngine`] composes everything behind a single
//! infallible `handle_query` operation consumed by a thin request layer.
//!
//! All engine state is immutable after [`QueryEngineBuilder::build`]
//! completes, so a shared engine serves concurrent requests without locking.

pub mod config;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod glossary;
pub mod index;
pub mod market;
pub mod synthesis;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use document::{ChatTurn, Document, RankedDocument, Response, SourceKind, SourceRef};
pub use embedding::{EmbeddingProvider, HashingEmbedder};
pub use engine::{QueryEngine, QueryEngineBuilder};
pub use error::{EngineError, Result};
pub use glossary::Glossary;
pub use index::EmbeddingIndex;
pub use market::{MarketData, MISSING_DATA};
