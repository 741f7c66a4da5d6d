//! JSON-file-backed store.
//!
//! Persists each collection as one JSON array on disk, the layout the
//! flat-file deployments already use. A whole-collection read-modify-write is
//! racy on its own, so every operation runs under one store-wide mutex; that
//! explicit mutual-exclusion layer is what makes the conditional mutations
//! atomic. The trade-off is that disjoint keys serialize too; use the
//! in-memory store where parallelism matters and this adapter where a plain
//! file is the durability story.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::core::store::{Record, RecordStore, RemoveOutcome, StoreError};

/// File-backed record store using a JSON array for durability.
pub struct JsonFileStore<R: Record> {
    path: PathBuf,
    records: Mutex<Vec<R>>,
}

impl<R: Record> JsonFileStore<R> {
    /// Open a store at `path`, creating an empty collection file if none
    /// exists yet.
    ///
    /// # Errors
    /// `StoreError::Backend` when the file cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| StoreError::Backend(e.to_string()))?;
        }
        let records = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Backend(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::Backend(e.to_string())),
        };
        let store = Self {
            path,
            records: Mutex::new(records),
        };
        store.persist(&store.records.lock())?;
        Ok(store)
    }

    /// Write the collection to a sibling temp file, then rename into place so
    /// readers never observe a half-written file.
    fn persist(&self, records: &[R]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

impl<R: Record> RecordStore<R> for JsonFileStore<R> {
    fn get(&self, key: &R::Key) -> Result<Option<R>, StoreError> {
        let records = self.records.lock();
        Ok(records.iter().find(|r| &r.key() == key).cloned())
    }

    fn list(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.records.lock().clone())
    }

    fn insert_if_absent(&self, record: R) -> Result<(), StoreError> {
        let mut records = self.records.lock();
        let key = record.key();
        if records.iter().any(|r| r.key() == key) {
            return Err(StoreError::Occupied);
        }
        records.push(record);
        if let Err(e) = self.persist(&records) {
            // Durability failed; roll the in-memory state back so no booking
            // exists that would vanish on restart.
            records.pop();
            return Err(e);
        }
        Ok(())
    }

    fn remove_if_owner(&self, key: &R::Key, owner: &str) -> Result<RemoveOutcome, StoreError> {
        let mut records = self.records.lock();
        let Some(idx) = records.iter().position(|r| &r.key() == key) else {
            return Ok(RemoveOutcome::Missing);
        };
        if records[idx].owner() != owner {
            return Ok(RemoveOutcome::ForeignOwner);
        }
        let removed = records.remove(idx);
        if let Err(e) = self.persist(&records) {
            records.insert(idx, removed);
            return Err(e);
        }
        Ok(RemoveOutcome::Removed)
    }
}
