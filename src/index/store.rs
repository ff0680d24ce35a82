//! The index store: interner, inverted/forward indexes and metadata.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use ahash::AHashSet;
use rayon::prelude::*;

use crate::analysis::{is_valid_word, split_words_view};
use crate::document::{DocId, DocumentData, Status, Term};
use crate::error::{MinnowError, Result};

/// Shared row returned for unknown document ids.
static EMPTY_ROW: BTreeMap<Term, f64> = BTreeMap::new();

/// In-memory document store with an inverted and a forward index.
///
/// Both indexes reference the same interned term storage: every distinct
/// term is held by exactly one `Arc<str>`, cloned into each index entry
/// that mentions it. Terms are never evicted before the store is dropped,
/// so index views stay valid for the engine's lifetime.
#[derive(Debug)]
pub struct IndexStore {
    /// Canonical storage for every distinct term ever indexed.
    terms: AHashSet<Term>,
    /// term → (document id → term frequency).
    pub(crate) inverted: BTreeMap<Term, BTreeMap<DocId, f64>>,
    /// document id → (term → term frequency).
    pub(crate) forward: BTreeMap<DocId, BTreeMap<Term, f64>>,
    /// document id → metadata.
    pub(crate) documents: BTreeMap<DocId, DocumentData>,
    /// All document ids, in ascending order.
    ids: BTreeSet<DocId>,
    /// Words that are never indexed and never parsed as query terms.
    stop_words: BTreeSet<String>,
}

impl IndexStore {
    /// Create an empty store with the given stop words.
    pub fn new(stop_words: BTreeSet<String>) -> Self {
        IndexStore {
            terms: AHashSet::new(),
            inverted: BTreeMap::new(),
            forward: BTreeMap::new(),
            documents: BTreeMap::new(),
            ids: BTreeSet::new(),
            stop_words,
        }
    }

    /// The stop-word set this store was created with.
    pub fn stop_words(&self) -> &BTreeSet<String> {
        &self.stop_words
    }

    /// Number of documents currently indexed.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Whether `document_id` is present.
    pub fn contains(&self, document_id: DocId) -> bool {
        self.documents.contains_key(&document_id)
    }

    /// Document ids in ascending order.
    pub fn iter_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.ids.iter().copied()
    }

    /// Metadata for `document_id`, if present.
    pub fn document_data(&self, document_id: DocId) -> Option<DocumentData> {
        self.documents.get(&document_id).copied()
    }

    /// The forward row of `document_id`: term → term frequency.
    ///
    /// Unknown ids get a reference to a shared empty row.
    pub fn word_frequencies(&self, document_id: DocId) -> &BTreeMap<Term, f64> {
        self.forward.get(&document_id).unwrap_or(&EMPTY_ROW)
    }

    /// Ingest a document.
    ///
    /// All validation happens before any mutation: a returned error means
    /// the store is unchanged. A document whose tokens are all stop words
    /// is accepted and produces an empty forward row.
    pub fn add_document(
        &mut self,
        document_id: DocId,
        text: &str,
        status: Status,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 {
            return Err(MinnowError::InvalidId(document_id));
        }
        if self.documents.contains_key(&document_id) {
            return Err(MinnowError::DuplicateId(document_id));
        }

        let words = self.split_into_words_no_stop(text)?;

        let mut row: BTreeMap<Term, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                let term = self.intern(word);
                *self
                    .inverted
                    .entry(Arc::clone(&term))
                    .or_default()
                    .entry(document_id)
                    .or_insert(0.0) += inv_word_count;
                *row.entry(term).or_insert(0.0) += inv_word_count;
            }
        }

        self.forward.insert(document_id, row);
        self.documents.insert(
            document_id,
            DocumentData {
                rating: average_rating(ratings),
                status,
            },
        );
        self.ids.insert(document_id);
        Ok(())
    }

    /// Remove a document and every index entry that mentions it.
    pub fn remove_document(&mut self, document_id: DocId) -> Result<()> {
        let row = self.take_forward_row(document_id)?;
        for term in row.keys() {
            let emptied = match self.inverted.get_mut(&**term) {
                Some(postings) => {
                    postings.remove(&document_id);
                    postings.is_empty()
                }
                None => false,
            };
            if emptied {
                self.inverted.remove(&**term);
            }
        }
        self.finish_removal(document_id);
        Ok(())
    }

    /// Remove a document, scrubbing the inverted index in parallel.
    ///
    /// Produces exactly the same state as [`IndexStore::remove_document`].
    pub fn remove_document_par(&mut self, document_id: DocId) -> Result<()> {
        let row = self.take_forward_row(document_id)?;
        self.inverted.par_iter_mut().for_each(|(term, postings)| {
            if row.contains_key(&**term) {
                postings.remove(&document_id);
            }
        });
        for term in row.keys() {
            if self
                .inverted
                .get(&**term)
                .is_some_and(|postings| postings.is_empty())
            {
                self.inverted.remove(&**term);
            }
        }
        self.finish_removal(document_id);
        Ok(())
    }

    /// IDF of a term given its posting list. Only meaningful for terms
    /// present in the inverted index.
    pub(crate) fn inverse_document_freq(&self, postings: &BTreeMap<DocId, f64>) -> f64 {
        (self.documents.len() as f64 / postings.len() as f64).ln()
    }

    fn take_forward_row(&mut self, document_id: DocId) -> Result<BTreeMap<Term, f64>> {
        if document_id < 0 {
            return Err(MinnowError::InvalidId(document_id));
        }
        self.forward
            .remove(&document_id)
            .ok_or(MinnowError::NotFound(document_id))
    }

    fn finish_removal(&mut self, document_id: DocId) {
        self.documents.remove(&document_id);
        self.ids.remove(&document_id);
    }

    /// Tokenize, validate and drop stop words.
    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_words_view(text) {
            if !is_valid_word(word) {
                return Err(MinnowError::InvalidChar(word.to_string()));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    /// Return the canonical `Arc` for `word`, creating it on first use.
    fn intern(&mut self, word: &str) -> Term {
        match self.terms.get(word) {
            Some(term) => Arc::clone(term),
            None => {
                let term: Term = Arc::from(word);
                self.terms.insert(Arc::clone(&term));
                term
            }
        }
    }
}

/// Integer mean of the ratings, truncating toward zero. Empty input is 0.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| i64::from(rating)).sum();
    (sum / ratings.len() as i64) as i32
}
