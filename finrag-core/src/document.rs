//! Data types for documents, provenance, and query responses.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The kind of corpus file a document was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    ResearchPaper,
    TextbookExcerpt,
    FinancialNews,
    EconomicIndicator,
}

/// A unit of retrievable text with metadata.
///
/// Documents are immutable once loaded; the collection is loaded once per
/// process lifetime and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Display title of the document.
    pub title: String,
    /// The text content used for embedding and answer assembly.
    pub content: String,
    /// Which corpus the document belongs to.
    pub source: SourceKind,
    /// Optional publication date, as an opaque display string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A retrieved [`Document`] paired with a relevance score.
///
/// The score is request-scoped; it is never written back to the stored corpus.
#[derive(Debug, Clone, Serialize)]
pub struct RankedDocument {
    /// The retrieved document.
    pub document: Document,
    /// The raw inner-product score (higher is more relevant).
    pub score: f32,
}

/// Provenance entry for one ranked document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRef {
    /// The corpus the document came from.
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// The document title.
    pub title: String,
    /// The document date, when the corpus record carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl SourceRef {
    /// Build a provenance entry from a document.
    pub fn from_document(document: &Document) -> Self {
        Self {
            kind: document.source,
            title: document.title.clone(),
            date: document.date.clone(),
        }
    }
}

/// One turn of chat history, accepted with a query but not used by
/// ranking or synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who produced the turn (e.g. "user", "assistant").
    #[serde(default)]
    pub role: String,
    /// The text of the turn.
    #[serde(default)]
    pub content: String,
}

/// The structured output of one query.
///
/// Maps are insertion-ordered so serialized output reflects match order:
/// longest-first for glossary terms, rule order for market data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// The assembled answer text.
    pub answer: String,
    /// Provenance for every ranked document, in rank order.
    pub sources: Vec<SourceRef>,
    /// Matched glossary terms with their definitions.
    pub glossary_terms: IndexMap<String, String>,
    /// Triggered market-data labels with their display strings.
    pub market_data: IndexMap<String, String>,
}
