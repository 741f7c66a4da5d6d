//! The reservation ledger: the authoritative record of all live bookings.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use tracing::{info, warn};

use crate::core::accounts::AccountStore;
use crate::core::catalog::ResourceCatalog;
use crate::core::model::{Booking, SlotDate, SlotKey, SlotTime};
use crate::core::store::{RecordStore, RemoveOutcome, StoreError};
use crate::core::BookingError;
use crate::util::clock::now_ms;

/// The booking engine.
///
/// Exclusively owns the set of live bookings: all mutation passes through
/// [`reserve`](Self::reserve) and [`cancel`](Self::cancel), and both ride the
/// store's atomic conditional operations, so the free-check and the write on
/// a slot key are one indivisible step. Two racing reserves on the same key
/// admit exactly one winner; the loser gets `SlotTaken` with no partial
/// state. A per-user index sits beside the store for fast listings.
pub struct ReservationLedger {
    catalog: Arc<ResourceCatalog>,
    accounts: Arc<AccountStore>,
    store: Arc<dyn RecordStore<Booking>>,
    by_user: RwLock<HashMap<String, BTreeSet<SlotKey>>>,
}

impl ReservationLedger {
    /// Build a ledger over its backing store, rebuilding the per-user index
    /// from whatever bookings the store already holds (file-backed stores
    /// survive restarts).
    ///
    /// # Errors
    /// `BookingError::Store` when the initial snapshot fails.
    pub fn new(
        catalog: Arc<ResourceCatalog>,
        accounts: Arc<AccountStore>,
        store: Arc<dyn RecordStore<Booking>>,
    ) -> Result<Self, BookingError> {
        let mut by_user: HashMap<String, BTreeSet<SlotKey>> = HashMap::new();
        for booking in store.list().map_err(store_err)? {
            by_user
                .entry(booking.username.clone())
                .or_default()
                .insert(booking.slot());
        }
        Ok(Self {
            catalog,
            accounts,
            store,
            by_user: RwLock::new(by_user),
        })
    }

    /// Reserve a slot for a user: referential checks, then atomic
    /// check-and-insert on the composite key.
    ///
    /// # Errors
    /// `UnknownResource` / `UnknownUser` when referential integrity fails;
    /// `SlotTaken` when the key is occupied (nothing was mutated);
    /// `Store` on backend failure.
    pub fn reserve(
        &self,
        username: &str,
        resource_id: &str,
        date: SlotDate,
        time: SlotTime,
    ) -> Result<Booking, BookingError> {
        if self.catalog.get(resource_id).is_none() {
            return Err(BookingError::UnknownResource(resource_id.to_owned()));
        }
        if self.accounts.find(username)?.is_none() {
            return Err(BookingError::UnknownUser(username.to_owned()));
        }

        let booking = Booking {
            username: username.to_owned(),
            resource_id: resource_id.to_owned(),
            date,
            time,
            created_at_ms: now_ms(),
        };
        let key = booking.slot();
        match self.store.insert_if_absent(booking.clone()) {
            Ok(()) => {
                self.by_user
                    .write()
                    .entry(username.to_owned())
                    .or_default()
                    .insert(key.clone());
                info!(%key, username, "slot reserved");
                Ok(booking)
            }
            Err(StoreError::Occupied) => {
                warn!(%key, username, "reserve lost: slot taken");
                Err(BookingError::SlotTaken)
            }
            Err(e) => Err(store_err(e)),
        }
    }

    /// Cancel a live booking; only the owning user may do so.
    ///
    /// # Errors
    /// `NotFound` when no booking holds the key; `NotOwner` when the booking
    /// belongs to someone else (the booking survives); `Store` on backend
    /// failure.
    pub fn cancel(&self, username: &str, key: &SlotKey) -> Result<(), BookingError> {
        match self.store.remove_if_owner(key, username).map_err(store_err)? {
            RemoveOutcome::Removed => {
                let mut by_user = self.by_user.write();
                if let Some(keys) = by_user.get_mut(username) {
                    keys.remove(key);
                    if keys.is_empty() {
                        by_user.remove(username);
                    }
                }
                info!(%key, username, "booking cancelled");
                Ok(())
            }
            RemoveOutcome::Missing => Err(BookingError::NotFound),
            RemoveOutcome::ForeignOwner => {
                warn!(%key, username, "cancel rejected: not the owner");
                Err(BookingError::NotOwner)
            }
        }
    }

    /// All live bookings of one user, ascending by `(date, time, resource)`.
    ///
    /// # Errors
    /// `BookingError::Store` on backend failure.
    pub fn list_for_user(&self, username: &str) -> Result<Vec<Booking>, BookingError> {
        let keys: Vec<SlotKey> = self
            .by_user
            .read()
            .get(username)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();

        let mut bookings = Vec::with_capacity(keys.len());
        for key in keys {
            // A concurrent cancel may have emptied the key between the index
            // read and the store read; skip such keys.
            if let Some(b) = self.store.get(&key).map_err(store_err)? {
                if b.username == username {
                    bookings.push(b);
                }
            }
        }
        Ok(bookings)
    }

    /// All live bookings of one resource on one date, ascending by time.
    /// Other resources' bookings never appear in the result.
    ///
    /// # Errors
    /// `BookingError::Store` on backend failure.
    pub fn list_for_resource_date(
        &self,
        resource_id: &str,
        date: &SlotDate,
    ) -> Result<Vec<Booking>, BookingError> {
        let mut bookings: Vec<Booking> = self
            .store
            .list()
            .map_err(store_err)?
            .into_iter()
            .filter(|b| b.resource_id == resource_id && &b.date == date)
            .collect();
        bookings.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(bookings)
    }
}

fn store_err(e: StoreError) -> BookingError {
    BookingError::Store(e.to_string())
}
