//! In-memory index storage.
//!
//! The store owns the interned term buffers, the inverted index
//! (term → posting list), the forward index (document → word
//! frequencies), per-document metadata and the ordered id set.

pub mod store;

pub use store::IndexStore;
