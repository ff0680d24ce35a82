//! The search engine facade.
//!
//! Ties together tokenization, query parsing, the index store, the
//! ranker and the matcher behind one public surface. Reads take `&self`
//! and may run concurrently from many threads; mutators take `&mut self`,
//! so callers cannot overlap them with anything else.

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::{is_valid_word, split_words_view};
use crate::document::{DocId, Document, Status, Term};
use crate::error::{MinnowError, Result};
use crate::index::IndexStore;
use crate::query::{parse_query, parse_query_vec};
use crate::search::{matcher, ranker};

/// Selects the sequential or the parallel algorithm for an otherwise
/// identical operation. Both produce the same results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    /// Single-threaded execution.
    #[default]
    Sequenced,
    /// Multi-threaded execution on the rayon pool.
    Parallel,
}

/// An in-memory document search engine.
///
/// Documents are whitespace-tokenized short texts with a status and a
/// rating history. Queries combine plus-terms and minus-terms and are
/// ranked by TF-IDF, ties broken by rating.
#[derive(Debug)]
pub struct SearchEngine {
    store: IndexStore,
}

impl SearchEngine {
    /// Create an engine with no stop words.
    pub fn new() -> Self {
        SearchEngine {
            store: IndexStore::new(BTreeSet::new()),
        }
    }

    /// Create an engine from a whitespace-separated stop-word string.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::with_stop_words(split_words_view(text))
    }

    /// Create an engine from any collection of stop words.
    ///
    /// Empty entries are skipped; a stop word containing a control
    /// character is rejected with `InvalidChar`.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = BTreeSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if !is_valid_word(word) {
                return Err(MinnowError::InvalidChar(word.to_string()));
            }
            if !word.is_empty() {
                words.insert(word.to_string());
            }
        }
        Ok(SearchEngine {
            store: IndexStore::new(words),
        })
    }

    /// Ingest a document. Fails on a negative or duplicate id, or on a
    /// control character anywhere in the text; a failed call leaves the
    /// engine unchanged.
    pub fn add_document(
        &mut self,
        document_id: DocId,
        text: &str,
        status: Status,
        ratings: &[i32],
    ) -> Result<()> {
        self.store.add_document(document_id, text, status, ratings)
    }

    /// Number of documents currently indexed.
    pub fn document_count(&self) -> usize {
        self.store.document_count()
    }

    /// Document ids in ascending order.
    pub fn iter_doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.store.iter_ids()
    }

    /// Word frequencies of one document: term → TF. Unknown ids yield an
    /// empty map.
    pub fn get_word_frequencies(&self, document_id: DocId) -> &BTreeMap<Term, f64> {
        self.store.word_frequencies(document_id)
    }

    /// Remove a document and every index entry that mentions it.
    pub fn remove_document(&mut self, document_id: DocId) -> Result<()> {
        self.remove_document_with(ExecutionPolicy::Sequenced, document_id)
    }

    /// Remove a document under the given execution policy.
    pub fn remove_document_with(
        &mut self,
        policy: ExecutionPolicy,
        document_id: DocId,
    ) -> Result<()> {
        match policy {
            ExecutionPolicy::Sequenced => self.store.remove_document(document_id),
            ExecutionPolicy::Parallel => self.store.remove_document_par(document_id),
        }
    }

    /// Top documents for `raw_query` among documents with status
    /// [`Status::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, Status::Actual)
    }

    /// Top documents for `raw_query` among documents with the given
    /// status.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: Status,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_filtered(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents for `raw_query` among documents passing the
    /// predicate, which receives `(id, status, rating)`.
    pub fn find_top_documents_filtered<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, Status, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequenced, raw_query, predicate)
    }

    /// Top documents under the given execution policy; the most general
    /// form. The predicate must be pure, and thread-safe under
    /// [`ExecutionPolicy::Parallel`].
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, Status, i32) -> bool + Sync,
    {
        let query = parse_query(raw_query, self.store.stop_words())?;
        let documents = match policy {
            ExecutionPolicy::Sequenced => ranker::find_all_documents(&self.store, &query, predicate),
            ExecutionPolicy::Parallel => {
                ranker::find_all_documents_par(&self.store, &query, predicate)
            }
        };
        Ok(ranker::top_documents(documents))
    }

    /// The plus-terms of `raw_query` occurring in the document, sorted,
    /// together with the document's status. Any matching minus-term
    /// empties the list.
    pub fn match_document(&self, raw_query: &str, document_id: DocId) -> Result<(Vec<String>, Status)> {
        self.match_document_with(ExecutionPolicy::Sequenced, raw_query, document_id)
    }

    /// Match a document under the given execution policy.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        document_id: DocId,
    ) -> Result<(Vec<String>, Status)> {
        if document_id < 0 {
            return Err(MinnowError::InvalidId(document_id));
        }
        if !self.store.contains(document_id) {
            return Err(MinnowError::NotFound(document_id));
        }
        match policy {
            ExecutionPolicy::Sequenced => {
                let query = parse_query(raw_query, self.store.stop_words())?;
                Ok(matcher::match_words(&self.store, &query, document_id))
            }
            ExecutionPolicy::Parallel => {
                let query = parse_query_vec(raw_query, self.store.stop_words())?;
                Ok(matcher::match_words_par(&self.store, &query, document_id))
            }
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_word_constructors() {
        let from_text = SearchEngine::from_stop_words_text("  in   the ").unwrap();
        let from_collection = SearchEngine::with_stop_words(["in", "the", ""]).unwrap();
        assert_eq!(
            from_text.store.stop_words(),
            from_collection.store.stop_words()
        );

        assert_eq!(
            SearchEngine::with_stop_words(["o\u{1f}k"]).unwrap_err(),
            MinnowError::InvalidChar("o\u{1f}k".to_string())
        );
    }

    #[test]
    fn test_document_lifecycle() {
        let mut engine = SearchEngine::new();
        engine
            .add_document(3, "some cat", Status::Actual, &[1])
            .unwrap();
        engine
            .add_document(1, "other cat", Status::Actual, &[2])
            .unwrap();

        assert_eq!(engine.document_count(), 2);
        assert_eq!(engine.iter_doc_ids().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(engine.get_word_frequencies(3)["cat"], 0.5);
        assert!(engine.get_word_frequencies(99).is_empty());

        engine.remove_document(3).unwrap();
        assert_eq!(engine.document_count(), 1);
        assert!(engine.get_word_frequencies(3).is_empty());
    }

    #[test]
    fn test_match_document_id_validation_is_policy_independent() {
        let mut engine = SearchEngine::new();
        engine.add_document(1, "cat", Status::Actual, &[]).unwrap();

        for policy in [ExecutionPolicy::Sequenced, ExecutionPolicy::Parallel] {
            assert_eq!(
                engine.match_document_with(policy, "cat", -5).unwrap_err(),
                MinnowError::InvalidId(-5)
            );
            assert_eq!(
                engine.match_document_with(policy, "cat", 2).unwrap_err(),
                MinnowError::NotFound(2)
            );
        }
    }

    #[test]
    fn test_invalid_query_never_mutates() {
        let mut engine = SearchEngine::new();
        engine.add_document(1, "cat", Status::Actual, &[]).unwrap();

        assert!(engine.find_top_documents("cat --city").is_err());
        assert!(engine.find_top_documents("cat -").is_err());
        assert_eq!(engine.document_count(), 1);
        assert_eq!(engine.find_top_documents("cat").unwrap().len(), 1);
    }
}
