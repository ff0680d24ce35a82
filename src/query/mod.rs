//! Query model and parser.
//!
//! A raw query string is classified token by token into plus-terms and
//! minus-terms. Stop words are discarded, malformed tokens are rejected.

pub mod parser;

pub use parser::{parse_query, parse_query_vec};

use std::collections::BTreeSet;

/// A parsed query with deduplicated, ordered term sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    /// Terms a document must contain to be ranked.
    pub plus_words: BTreeSet<String>,
    /// Terms that exclude a document from the results.
    pub minus_words: BTreeSet<String>,
}

/// A parsed query that preserves token order and duplicates.
///
/// Consumed by the parallel matcher, which deduplicates after the parallel
/// filtering step instead of during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryVec {
    /// Plus-terms in query order, duplicates kept.
    pub plus_words: Vec<String>,
    /// Minus-terms in query order, duplicates kept.
    pub minus_words: Vec<String>,
}
