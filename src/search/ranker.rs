//! TF-IDF relevance aggregation and result ordering.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::concurrent::ShardedMap;
use crate::document::{DocId, Document, Status};
use crate::index::IndexStore;
use crate::query::Query;
use crate::search::{MAX_RESULT_COUNT, RELEVANCE_EPSILON};

/// Shard count of the relevance accumulator used by the parallel path.
const RELEVANCE_SHARDS: usize = 101;

/// Aggregate relevance for every document matching `query`.
///
/// Plus-terms add `tf * idf` for each posting whose document passes the
/// predicate; minus-terms then erase their postings' documents. The
/// result is unsorted but carries ascending ids, courtesy of the ordered
/// accumulator.
pub(crate) fn find_all_documents<P>(store: &IndexStore, query: &Query, predicate: P) -> Vec<Document>
where
    P: Fn(DocId, Status, i32) -> bool,
{
    let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();

    for word in &query.plus_words {
        let Some(postings) = store.inverted.get(word.as_str()) else {
            continue;
        };
        let idf = store.inverse_document_freq(postings);
        for (&document_id, &tf) in postings {
            let data = &store.documents[&document_id];
            if predicate(document_id, data.status, data.rating) {
                *relevance.entry(document_id).or_insert(0.0) += tf * idf;
            }
        }
    }

    for word in &query.minus_words {
        let Some(postings) = store.inverted.get(word.as_str()) else {
            continue;
        };
        for document_id in postings.keys() {
            relevance.remove(document_id);
        }
    }

    collect_documents(store, relevance)
}

/// Parallel variant of [`find_all_documents`].
///
/// Workers iterate the plus-terms (then the minus-terms) in parallel over
/// the immutable posting lists, sharing a sharded accumulator through
/// scoped per-key handles. Yields the same documents as the sequential
/// path.
pub(crate) fn find_all_documents_par<P>(
    store: &IndexStore,
    query: &Query,
    predicate: P,
) -> Vec<Document>
where
    P: Fn(DocId, Status, i32) -> bool + Sync,
{
    let accumulator: ShardedMap<DocId, f64> = ShardedMap::new(RELEVANCE_SHARDS);

    query.plus_words.par_iter().for_each(|word| {
        let Some(postings) = store.inverted.get(word.as_str()) else {
            return;
        };
        let idf = store.inverse_document_freq(postings);
        for (&document_id, &tf) in postings {
            let data = &store.documents[&document_id];
            if predicate(document_id, data.status, data.rating) {
                *accumulator.access(document_id) += tf * idf;
            }
        }
    });

    query.minus_words.par_iter().for_each(|word| {
        let Some(postings) = store.inverted.get(word.as_str()) else {
            return;
        };
        for &document_id in postings.keys() {
            accumulator.erase(document_id);
        }
    });

    collect_documents(store, accumulator.build_ordinary_map())
}

/// Order by relevance descending, by rating descending inside the epsilon
/// band, and truncate to [`MAX_RESULT_COUNT`].
///
/// The sort is stable, so documents tying on both keys keep the ascending
/// id order they arrived in.
pub(crate) fn top_documents(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by(|lhs, rhs| {
        if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
            rhs.rating.cmp(&lhs.rating)
        } else {
            rhs.relevance.total_cmp(&lhs.relevance)
        }
    });
    documents.truncate(MAX_RESULT_COUNT);
    documents
}

fn collect_documents(store: &IndexStore, relevance: BTreeMap<DocId, f64>) -> Vec<Document> {
    relevance
        .into_iter()
        .map(|(document_id, relevance)| {
            Document::new(document_id, relevance, store.documents[&document_id].rating)
        })
        .collect()
}
