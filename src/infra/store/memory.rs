//! Sharded in-memory store.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use parking_lot::Mutex;

use crate::core::store::{Record, RecordStore, RemoveOutcome, StoreError};

/// In-memory record store sharded by key hash.
///
/// Each shard is an independent `parking_lot::Mutex<HashMap>`, so operations
/// on keys living in different shards proceed in parallel while calls on the
/// same key are strictly serialized by that key's shard lock. The default
/// shard count scales with the machine's core count.
pub struct InMemoryStore<R: Record> {
    shards: Vec<Mutex<HashMap<R::Key, R>>>,
}

impl<R: Record> InMemoryStore<R> {
    /// Create a store with the default shard count (next power of two at or
    /// above the core count, at least 4).
    #[must_use]
    pub fn new() -> Self {
        Self::with_shards(num_cpus::get().max(4).next_power_of_two())
    }

    /// Create a store with an explicit shard count (rounded up to a power of
    /// two; at least 1).
    #[must_use]
    pub fn with_shards(count: usize) -> Self {
        let count = count.max(1).next_power_of_two();
        let shards = (0..count).map(|_| Mutex::new(HashMap::new())).collect();
        Self { shards }
    }

    fn shard(&self, key: &R::Key) -> &Mutex<HashMap<R::Key, R>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        // Shard count is a power of two, so masking is an even split.
        let idx = (hasher.finish() as usize) & (self.shards.len() - 1);
        &self.shards[idx]
    }
}

impl<R: Record> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordStore<R> for InMemoryStore<R> {
    fn get(&self, key: &R::Key) -> Result<Option<R>, StoreError> {
        Ok(self.shard(key).lock().get(key).cloned())
    }

    fn list(&self) -> Result<Vec<R>, StoreError> {
        let mut out = Vec::new();
        for shard in &self.shards {
            out.extend(shard.lock().values().cloned());
        }
        Ok(out)
    }

    fn insert_if_absent(&self, record: R) -> Result<(), StoreError> {
        let key = record.key();
        let mut shard = self.shard(&key).lock();
        if shard.contains_key(&key) {
            return Err(StoreError::Occupied);
        }
        shard.insert(key, record);
        Ok(())
    }

    fn remove_if_owner(&self, key: &R::Key, owner: &str) -> Result<RemoveOutcome, StoreError> {
        let mut shard = self.shard(key).lock();
        match shard.get(key) {
            None => Ok(RemoveOutcome::Missing),
            Some(record) if record.owner() != owner => Ok(RemoveOutcome::ForeignOwner),
            Some(_) => {
                shard.remove(key);
                Ok(RemoveOutcome::Removed)
            }
        }
    }
}
