//! Whitespace tokenizer implementation.
//!
//! Only the ASCII space (0x20) separates words. Tabs, newlines and other
//! control characters are not separators; validation rejects them later.

/// Split text into owned words, ignoring repeated spaces.
pub fn split_words(text: &str) -> Vec<String> {
    split_words_view(text)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Split text into borrowed words, ignoring repeated spaces.
///
/// The returned slices borrow from `text`, so this form is used whenever
/// the caller owns the backing buffer for the duration of the operation.
pub fn split_words_view(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}
