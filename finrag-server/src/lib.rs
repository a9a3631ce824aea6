//! # finrag-server
//!
//! The thin request layer around [`finrag_core`]: data loading with
//! first-run seeding, an axum HTTP surface (`POST /api/chat`, health probe,
//! status page), CORS, and process setup. All retrieval logic lives in the
//! core crate.

pub mod loader;
pub mod server;
