//! Resource catalog: the registry of bookable resources.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::core::model::Resource;
use crate::core::store::{RecordStore, StoreError};
use crate::core::BookingError;

/// Read-only registry of bookable resources.
///
/// Loaded once at engine build time: if the backing store holds no resources
/// yet, the configured seed set is persisted first (atomically per record, so
/// two processes racing on first boot cannot duplicate a resource). After
/// construction the catalog is an immutable snapshot; bookings never mutate
/// it.
pub struct ResourceCatalog {
    ordered: Vec<Resource>,
    by_id: HashMap<String, usize>,
}

impl ResourceCatalog {
    /// Load the catalog, seeding the store when it is empty.
    ///
    /// # Errors
    /// `BookingError::Store` when the backing store fails.
    pub fn load(
        store: &Arc<dyn RecordStore<Resource>>,
        seed: &[Resource],
    ) -> Result<Self, BookingError> {
        let existing = store.list().map_err(store_err)?;
        if existing.is_empty() && !seed.is_empty() {
            for resource in seed {
                match store.insert_if_absent(resource.clone()) {
                    Ok(()) | Err(StoreError::Occupied) => {}
                    Err(e) => return Err(store_err(e)),
                }
            }
            info!(count = seed.len(), "seeded resource catalog");
        }

        let mut ordered = store.list().map_err(store_err)?;
        // Store snapshots carry no order; sort by id so listings are stable
        // across restarts. The default seeds come back in seed order.
        ordered.sort_by(|a, b| a.id.cmp(&b.id));
        let by_id = ordered
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Ok(Self { ordered, by_id })
    }

    /// Look up a resource by id.
    #[must_use]
    pub fn get(&self, resource_id: &str) -> Option<&Resource> {
        self.by_id.get(resource_id).map(|&i| &self.ordered[i])
    }

    /// All resources, ascending by id.
    #[must_use]
    pub fn list(&self) -> &[Resource] {
        &self.ordered
    }
}

fn store_err(e: StoreError) -> BookingError {
    BookingError::Store(e.to_string())
}
