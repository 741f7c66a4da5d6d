//! Record store contract consumed by the catalog, account store, and ledger.
//!
//! Every collection the engine owns sits on the same narrow contract:
//! get-by-key, list, atomic insert-if-absent, and atomic delete-if-owner.
//! The two mutating operations are the ones correctness hangs on: the
//! existence check and the write must be one indivisible step with respect
//! to all other calls on the same key. Backends live in [`crate::infra`].

use std::fmt::Debug;
use std::hash::Hash;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors produced by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key is already occupied; the insert made no mutation.
    #[error("key already occupied")]
    Occupied,
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Outcome of a conditional delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The record existed, was owned by the caller, and was removed.
    Removed,
    /// No record exists under the key; nothing was mutated.
    Missing,
    /// The record exists but is owned by someone else; nothing was mutated.
    ForeignOwner,
}

/// A record a store can hold: keyed, owned, and serializable for the
/// file-backed adapter.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Key type the record is stored under.
    type Key: Clone + Eq + Hash + Debug + Send + Sync;

    /// The record's own key.
    fn key(&self) -> Self::Key;

    /// The owner label checked by [`RecordStore::remove_if_owner`].
    fn owner(&self) -> &str;
}

/// Shared-access keyed store with atomic conditional mutations.
///
/// Implementations serialize conflicting calls on the same key; calls on
/// disjoint keys should not block each other where the backend allows it.
pub trait RecordStore<R: Record>: Send + Sync {
    /// Fetch the record under `key`, if any.
    ///
    /// # Errors
    /// `StoreError::Backend` on backend failure.
    fn get(&self, key: &R::Key) -> Result<Option<R>, StoreError>;

    /// Snapshot of every record. Order is backend-defined; callers needing a
    /// deterministic order sort the snapshot themselves.
    ///
    /// # Errors
    /// `StoreError::Backend` on backend failure.
    fn list(&self) -> Result<Vec<R>, StoreError>;

    /// Atomic check-and-insert: store `record` only if its key is vacant.
    ///
    /// # Errors
    /// `StoreError::Occupied` when the key is taken (no mutation happened);
    /// `StoreError::Backend` on backend failure.
    fn insert_if_absent(&self, record: R) -> Result<(), StoreError>;

    /// Atomic delete-if-owner: remove the record under `key` only if it
    /// exists and its owner matches.
    ///
    /// # Errors
    /// `StoreError::Backend` on backend failure.
    fn remove_if_owner(&self, key: &R::Key, owner: &str) -> Result<RemoveOutcome, StoreError>;
}
