//! Concurrency primitives for parallel query execution.

pub mod sharded_map;

pub use sharded_map::{ShardKey, ShardedMap};
