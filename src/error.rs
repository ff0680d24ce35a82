//! Error types for the Minnow library.
//!
//! All fallible operations return [`Result`], and every failure is one of
//! the [`MinnowError`] variants. Validation always happens before any
//! mutation, so a returned error means the engine state is unchanged.

use thiserror::Error;

use crate::document::DocId;

/// The main error type for Minnow operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MinnowError {
    /// A word in a document, stop-word list or query contains a control
    /// character (byte in `0x00..=0x1F`).
    #[error("invalid character in word `{0}`")]
    InvalidChar(String),

    /// A query token of length zero.
    #[error("empty query word")]
    EmptyWord,

    /// A lone `-` with no word after it.
    #[error("minus word is empty")]
    EmptyMinusWord,

    /// A query token starting with `--`.
    #[error("double minus in query word `{0}`")]
    DoubleMinus(String),

    /// A negative document id.
    #[error("invalid document id {0}")]
    InvalidId(DocId),

    /// A document id that is already present in the engine.
    #[error("document id {0} already exists")]
    DuplicateId(DocId),

    /// A document id that is not present in the engine.
    #[error("document id {0} not found")]
    NotFound(DocId),
}

/// Result type alias for operations that may fail with [`MinnowError`].
pub type Result<T> = std::result::Result<T, MinnowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = MinnowError::InvalidChar("ca\u{10}t".to_string());
        assert_eq!(error.to_string(), "invalid character in word `ca\u{10}t`");

        let error = MinnowError::DuplicateId(42);
        assert_eq!(error.to_string(), "document id 42 already exists");

        let error = MinnowError::NotFound(7);
        assert_eq!(error.to_string(), "document id 7 not found");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(MinnowError::InvalidId(-1), MinnowError::InvalidId(-1));
        assert_ne!(MinnowError::EmptyWord, MinnowError::EmptyMinusWord);
    }
}
