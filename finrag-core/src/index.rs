//! Embedding index over the loaded document collection.

use tracing::info;

use crate::document::{Document, RankedDocument};
use crate::embedding::EmbeddingProvider;
use crate::error::{EngineError, Result};

/// Compute the raw inner product of two vectors.
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// An immutable index pairing each [`Document`] with its embedding vector.
///
/// Vectors are attached 1:1 to documents by position. The index is built once
/// at startup and only read afterwards, so it can be shared freely across
/// concurrent requests.
pub struct EmbeddingIndex {
    documents: Vec<Document>,
    vectors: Vec<Vec<f32>>,
}

impl EmbeddingIndex {
    /// Embed every document's content and build the index.
    ///
    /// Invariants checked here, not per request: the provider must return one
    /// vector per document, and every vector must match the provider's
    /// declared dimensionality.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexError`] on a count or dimension mismatch,
    /// or the provider's error if embedding fails.
    pub async fn build(
        provider: &dyn EmbeddingProvider,
        documents: Vec<Document>,
    ) -> Result<Self> {
        if documents.is_empty() {
            return Ok(Self { documents, vectors: Vec::new() });
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let vectors = provider.embed_batch(&texts).await?;

        if vectors.len() != documents.len() {
            return Err(EngineError::IndexError(format!(
                "provider returned {} vectors for {} documents",
                vectors.len(),
                documents.len()
            )));
        }
        let dimensions = provider.dimensions();
        if let Some(vector) = vectors.iter().find(|v| v.len() != dimensions) {
            return Err(EngineError::IndexError(format!(
                "vector of dimension {} in a {dimensions}-dimensional index",
                vector.len()
            )));
        }

        info!(document_count = documents.len(), dimensions, "built embedding index");
        Ok(Self { documents, vectors })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Rank all documents against a query embedding.
    ///
    /// Scores every document by the raw dot product of its vector and the
    /// query vector (no normalization, so vector magnitudes weigh into the
    /// ranking), then returns the `top_k` highest-scoring documents in
    /// descending order. Equal scores keep insertion order. An empty index
    /// yields an empty result.
    pub fn rank(&self, query_embedding: &[f32], top_k: usize) -> Vec<RankedDocument> {
        let mut ranked: Vec<RankedDocument> = self
            .documents
            .iter()
            .zip(self.vectors.iter())
            .map(|(document, vector)| RankedDocument {
                document: document.clone(),
                score: dot(vector, query_embedding),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(top_k);
        ranked
    }
}
