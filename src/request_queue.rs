//! Rolling window of recent query outcomes.
//!
//! Tracks, for the last [`REQUEST_WINDOW`] search requests, how many
//! returned no results. Behaves as a FIFO ring: once the window is full,
//! each new outcome evicts the oldest one.

use std::collections::VecDeque;

use crate::document::{Document, Status};
use crate::engine::SearchEngine;
use crate::error::Result;

/// Capacity of the request window.
pub const REQUEST_WINDOW: usize = 1440;

/// A search front that records empty-result statistics for the engine it
/// borrows.
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    outcomes: VecDeque<bool>,
    no_result_total: usize,
}

impl<'a> RequestQueue<'a> {
    /// Create an empty window over `engine`.
    pub fn new(engine: &'a SearchEngine) -> Self {
        RequestQueue {
            engine,
            outcomes: VecDeque::with_capacity(REQUEST_WINDOW),
            no_result_total: 0,
        }
    }

    /// Run a default search and record whether it came back empty.
    ///
    /// A query that fails to parse propagates its error and is not
    /// recorded.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let results = self.engine.find_top_documents(raw_query)?;
        self.record(results.is_empty());
        Ok(results)
    }

    /// Run a status-filtered search and record whether it came back
    /// empty.
    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: Status,
    ) -> Result<Vec<Document>> {
        let results = self.engine.find_top_documents_with_status(raw_query, status)?;
        self.record(results.is_empty());
        Ok(results)
    }

    /// How many of the recorded outcomes in the window were empty.
    pub fn no_result_count(&self) -> usize {
        self.no_result_total
    }

    fn record(&mut self, empty: bool) {
        if self.outcomes.len() == REQUEST_WINDOW {
            if self.outcomes.pop_front() == Some(true) {
                self.no_result_total -= 1;
            }
        }
        self.outcomes.push_back(empty);
        if empty {
            self.no_result_total += 1;
        }
    }
}
