//! Query/document matching: which plus-terms occur in one document.

use rayon::prelude::*;

use crate::document::{DocId, Status};
use crate::index::IndexStore;
use crate::query::{Query, QueryVec};

/// Report the plus-terms of `query` occurring in the document.
///
/// Any minus-term present in the document's forward row short-circuits to
/// an empty list. The caller guarantees the document exists.
pub(crate) fn match_words(store: &IndexStore, query: &Query, document_id: DocId) -> (Vec<String>, Status) {
    let status = store.documents[&document_id].status;
    let row = store.word_frequencies(document_id);

    for word in &query.minus_words {
        if row.contains_key(word.as_str()) {
            return (Vec::new(), status);
        }
    }

    let matched = query
        .plus_words
        .iter()
        .filter(|word| row.contains_key(word.as_str()))
        .cloned()
        .collect();
    (matched, status)
}

/// Parallel variant of [`match_words`].
///
/// Operates on the duplicate-preserving query form: minus-terms are
/// checked with a parallel `any`, plus-terms filtered in parallel, and
/// the survivors sorted and deduplicated afterwards. Yields the same
/// sorted set as the sequential path.
pub(crate) fn match_words_par(
    store: &IndexStore,
    query: &QueryVec,
    document_id: DocId,
) -> (Vec<String>, Status) {
    let status = store.documents[&document_id].status;
    let row = store.word_frequencies(document_id);
    if row.is_empty() {
        return (Vec::new(), status);
    }

    if query
        .minus_words
        .par_iter()
        .any(|word| row.contains_key(word.as_str()))
    {
        return (Vec::new(), status);
    }

    let mut matched: Vec<String> = query
        .plus_words
        .par_iter()
        .filter(|word| row.contains_key(word.as_str()))
        .cloned()
        .collect();
    matched.par_sort_unstable();
    matched.dedup();
    (matched, status)
}
