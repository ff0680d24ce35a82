//! Relevance ranking and query/document matching.

pub mod matcher;
pub mod ranker;

/// Number of results a top-documents query returns at most.
pub const MAX_RESULT_COUNT: usize = 5;

/// Relevance values closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;
