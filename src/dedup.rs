//! Duplicate-document detection and removal.

use ahash::AHashSet;

use crate::document::{DocId, Term};
use crate::engine::SearchEngine;
use crate::error::Result;

/// Remove every document whose term set equals that of an earlier
/// document (term frequencies and order are ignored).
///
/// Ids are scanned in ascending order, so the earliest document of each
/// equivalence class survives. Each removal is reported on its own
/// stdout line as `Found duplicate document id <id>`. Returns the
/// removed ids in ascending order.
pub fn remove_duplicates(engine: &mut SearchEngine) -> Result<Vec<DocId>> {
    let mut seen: AHashSet<Vec<Term>> = AHashSet::new();
    let mut duplicates = Vec::new();

    let ids: Vec<DocId> = engine.iter_doc_ids().collect();
    for document_id in ids {
        let term_set: Vec<Term> = engine
            .get_word_frequencies(document_id)
            .keys()
            .cloned()
            .collect();
        if !seen.insert(term_set) {
            duplicates.push(document_id);
        }
    }

    for &document_id in &duplicates {
        println!("Found duplicate document id {document_id}");
        engine.remove_document(document_id)?;
    }
    Ok(duplicates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Status;

    #[test]
    fn test_earliest_document_survives() {
        let mut engine = SearchEngine::new();
        engine
            .add_document(3, "funny pet", Status::Actual, &[1])
            .unwrap();
        engine
            .add_document(8, "pet funny funny", Status::Actual, &[2])
            .unwrap();
        engine
            .add_document(9, "funny pet rat", Status::Actual, &[3])
            .unwrap();

        let removed = remove_duplicates(&mut engine).unwrap();
        assert_eq!(removed, vec![8]);
        assert_eq!(engine.iter_doc_ids().collect::<Vec<_>>(), vec![3, 9]);
    }

    #[test]
    fn test_no_duplicates_is_a_no_op() {
        let mut engine = SearchEngine::new();
        engine.add_document(1, "cat", Status::Actual, &[]).unwrap();
        engine.add_document(2, "dog", Status::Actual, &[]).unwrap();

        assert!(remove_duplicates(&mut engine).unwrap().is_empty());
        assert_eq!(engine.document_count(), 2);
    }

    #[test]
    fn test_stop_word_differences_do_not_distinguish() {
        let mut engine = SearchEngine::from_stop_words_text("and with").unwrap();
        engine
            .add_document(2, "funny pet with curly hair", Status::Actual, &[])
            .unwrap();
        engine
            .add_document(4, "funny pet and curly hair", Status::Actual, &[])
            .unwrap();

        assert_eq!(remove_duplicates(&mut engine).unwrap(), vec![4]);
    }
}
