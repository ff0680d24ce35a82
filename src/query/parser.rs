//! Query parser for converting raw query strings into structured queries.

use std::collections::BTreeSet;

use crate::analysis::{is_valid_word, split_words_view};
use crate::error::{MinnowError, Result};
use crate::query::{Query, QueryVec};

/// A single classified query token.
struct QueryWord<'a> {
    word: &'a str,
    is_minus: bool,
    is_stop: bool,
}

/// Classify one token.
///
/// A leading `-` marks a minus-term and is stripped before the stop-word
/// check, so `-the` with stop word `the` is discarded entirely.
fn parse_query_word<'a>(token: &'a str, stop_words: &BTreeSet<String>) -> Result<QueryWord<'a>> {
    if token.is_empty() {
        return Err(MinnowError::EmptyWord);
    }
    if !is_valid_word(token) {
        return Err(MinnowError::InvalidChar(token.to_string()));
    }

    let (word, is_minus) = match token.strip_prefix('-') {
        Some(rest) => {
            if rest.is_empty() {
                return Err(MinnowError::EmptyMinusWord);
            }
            if rest.starts_with('-') {
                return Err(MinnowError::DoubleMinus(token.to_string()));
            }
            (rest, true)
        }
        None => (token, false),
    };

    Ok(QueryWord {
        word,
        is_minus,
        is_stop: stop_words.contains(word),
    })
}

/// Parse a raw query into ordered, deduplicated plus/minus term sets.
pub fn parse_query(text: &str, stop_words: &BTreeSet<String>) -> Result<Query> {
    let mut query = Query::default();
    for token in split_words_view(text) {
        let query_word = parse_query_word(token, stop_words)?;
        if query_word.is_stop {
            continue;
        }
        if query_word.is_minus {
            query.minus_words.insert(query_word.word.to_string());
        } else {
            query.plus_words.insert(query_word.word.to_string());
        }
    }
    Ok(query)
}

/// Parse a raw query keeping token order and duplicates.
pub fn parse_query_vec(text: &str, stop_words: &BTreeSet<String>) -> Result<QueryVec> {
    let mut query = QueryVec::default();
    for token in split_words_view(text) {
        let query_word = parse_query_word(token, stop_words)?;
        if query_word.is_stop {
            continue;
        }
        if query_word.is_minus {
            query.minus_words.push(query_word.word.to_string());
        } else {
            query.plus_words.push(query_word.word.to_string());
        }
    }
    Ok(query)
}
