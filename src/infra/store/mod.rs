//! Record store backends.
//!
//! Two implementations of [`crate::core::store::RecordStore`]: a sharded
//! in-memory store for parallel operation, and a JSON-file store matching
//! the flat-file layout with an explicit mutual-exclusion layer.

pub mod jsonfile;
pub mod memory;

pub use jsonfile::JsonFileStore;
pub use memory::InMemoryStore;
