//! A sharded key/value accumulator for concurrent updates.
//!
//! Many threads can accumulate into the mapping by key without
//! serializing on a single lock: each key belongs to one of N shards and
//! only that shard's mutex is taken. Keys in different shards never block
//! each other. No operation holds more than one shard lock at a time
//! except [`ShardedMap::build_ordinary_map`], which takes the shard locks
//! one after another in index order.

use std::collections::BTreeMap;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

/// Integer key types that can be assigned to a shard.
pub trait ShardKey: Copy + Ord + Send {
    /// Map the key into `0..shard_count`.
    fn shard_index(self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ShardKey for $ty {
                fn shard_index(self, shard_count: usize) -> usize {
                    (self as i128).rem_euclid(shard_count as i128) as usize
                }
            }
        )*
    };
}

impl_shard_key!(i32, i64, u32, u64, usize);

/// A key/value mapping split across N mutex-guarded ordered sub-maps.
pub struct ShardedMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V: Default + Clone> ShardedMap<K, V> {
    /// Create a map with `shard_count` shards. A power of two or a prime
    /// spreads integer keys evenly.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        ShardedMap {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    /// Lock the shard owning `key` and return a scoped handle to its
    /// value, inserting the default value if the key is absent.
    ///
    /// The shard stays locked until the handle is dropped.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V> {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        MutexGuard::map(shard.lock(), |map| map.entry(key).or_default())
    }

    /// Remove `key` from its shard.
    pub fn erase(&self, key: K) {
        self.shards[key.shard_index(self.shards.len())]
            .lock()
            .remove(&key);
    }

    /// Merge all shards into a single ordered map.
    ///
    /// A consistent snapshot when no writer is active.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let shard = shard.lock();
            for (key, value) in shard.iter() {
                merged.insert(*key, value.clone());
            }
        }
        merged
    }

    /// Total number of entries across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Whether no shard holds any entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
