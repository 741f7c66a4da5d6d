//! Read-side views over the ledger.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::core::catalog::ResourceCatalog;
use crate::core::ledger::ReservationLedger;
use crate::core::model::{Booking, SlotDate, SlotTime};
use crate::core::BookingError;
use crate::service::session::{SessionManager, SessionToken};

/// Pure read views: a user's bookings and a resource's taken times.
///
/// Never mutates the ledger. Results reflect the ledger's state at call
/// time; an overlapping write is seen either entirely or not at all.
pub struct QueryFacade {
    sessions: Arc<SessionManager>,
    catalog: Arc<ResourceCatalog>,
    ledger: Arc<ReservationLedger>,
}

impl QueryFacade {
    /// Wire the facade over its collaborators.
    pub fn new(
        sessions: Arc<SessionManager>,
        catalog: Arc<ResourceCatalog>,
        ledger: Arc<ReservationLedger>,
    ) -> Self {
        Self {
            sessions,
            catalog,
            ledger,
        }
    }

    /// The calling user's live bookings, ascending by `(date, time,
    /// resource)`.
    ///
    /// # Errors
    /// `NotAuthenticated` without a live session; `Store` on backend failure.
    pub fn my_bookings(&self, token: &SessionToken) -> Result<Vec<Booking>, BookingError> {
        let username = self
            .sessions
            .current_user(token)
            .ok_or(BookingError::NotAuthenticated)?;
        self.ledger.list_for_user(&username)
    }

    /// The set of already-taken times for one resource on one date.
    ///
    /// # Errors
    /// `InvalidSlot` on a malformed date label; `UnknownResource` when the
    /// resource is not cataloged; `Store` on backend failure.
    pub fn availability(
        &self,
        resource_id: &str,
        date: &str,
    ) -> Result<BTreeSet<SlotTime>, BookingError> {
        let date = SlotDate::parse(date)?;
        if self.catalog.get(resource_id).is_none() {
            return Err(BookingError::UnknownResource(resource_id.to_owned()));
        }
        let taken = self
            .ledger
            .list_for_resource_date(resource_id, &date)?
            .into_iter()
            .map(|b| b.time)
            .collect();
        Ok(taken)
    }
}
