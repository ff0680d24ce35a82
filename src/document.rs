//! Document model shared by the indexes and the search results.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Caller-supplied document identifier. Negative ids are rejected at
/// ingestion.
pub type DocId = i32;

/// An interned term. Both indexes hold clones of the same `Arc`, so each
/// distinct term is stored exactly once for the lifetime of the engine.
pub type Term = Arc<str>;

/// Moderation status of a document, assigned at ingestion and immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// Visible in default searches.
    #[default]
    Actual,
    /// Indexed but excluded from default searches.
    Irrelevant,
    /// Banned by moderation.
    Banned,
    /// Marked for removal.
    Removed,
}

/// A single ranked search result.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// The document id supplied at ingestion.
    pub id: DocId,
    /// TF-IDF relevance for the query that produced this result.
    pub relevance: f64,
    /// Average rating of the document.
    pub rating: i32,
}

impl Document {
    /// Create a new search result.
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Per-document metadata kept alongside the indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    /// Integer mean of the ratings supplied at ingestion.
    pub rating: i32,
    /// Moderation status.
    pub status: Status,
}
