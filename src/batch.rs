//! Bulk query processing.

use rayon::prelude::*;

use crate::document::Document;
use crate::engine::SearchEngine;
use crate::error::Result;

/// Run a default search for every query in parallel.
///
/// The outer vector preserves index correspondence with `queries`. The
/// first parse error, if any, is returned instead.
pub fn process_queries(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<Vec<Document>>> {
    queries
        .par_iter()
        .map(|query| engine.find_top_documents(query))
        .collect()
}

/// Run a default search for every query in parallel and concatenate the
/// result lists in input order.
pub fn process_queries_joined(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<Document>> {
    Ok(process_queries(engine, queries)?
        .into_iter()
        .flatten()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Status;

    fn engine() -> SearchEngine {
        let mut engine = SearchEngine::new();
        engine
            .add_document(1, "curly dog", Status::Actual, &[4])
            .unwrap();
        engine
            .add_document(2, "nasty cat", Status::Actual, &[2])
            .unwrap();
        engine
            .add_document(3, "nasty dog", Status::Actual, &[3])
            .unwrap();
        engine
    }

    fn queries(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn test_index_correspondence_is_preserved() {
        let engine = engine();
        let results =
            process_queries(&engine, &queries(&["dog", "missing", "cat"])).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].len(), 2);
        assert!(results[1].is_empty());
        assert_eq!(results[2].len(), 1);
        assert_eq!(results[2][0].id, 2);
    }

    #[test]
    fn test_joined_results_follow_input_order() {
        let engine = engine();
        let joined =
            process_queries_joined(&engine, &queries(&["cat", "dog"])).unwrap();

        let ids: Vec<_> = joined.iter().map(|doc| doc.id).collect();
        // "cat" hits first, then both "dog" hits in their ranked order.
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], 2);
    }

    #[test]
    fn test_parse_error_propagates() {
        let engine = engine();
        assert!(process_queries(&engine, &queries(&["dog", "--bad"])).is_err());
    }
}
