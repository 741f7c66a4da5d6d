//! Booking orchestration: session check, resource validation, ledger call.

use std::sync::Arc;

use tracing::warn;

use crate::core::catalog::ResourceCatalog;
use crate::core::ledger::ReservationLedger;
use crate::core::model::{Booking, SlotDate, SlotKey, SlotTime};
use crate::core::BookingError;
use crate::service::session::{SessionManager, SessionToken};
use crate::util::clock::now_ms;

/// A booking or cancellation request as submitted at the boundary.
///
/// Dates and times arrive as raw labels and are validated here, before the
/// ledger is involved. The optional deadline is absolute (ms since epoch); a
/// request whose deadline has passed is rejected before it touches any key,
/// and once past that gate the operation runs to completion.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Target resource id.
    pub resource_id: String,
    /// Requested date label (`YYYY-MM-DD`).
    pub date: String,
    /// Requested time label (`HH:MM`).
    pub time: String,
    /// Optional absolute deadline in milliseconds since the epoch.
    pub deadline_ms: Option<u128>,
}

impl BookingRequest {
    /// Build a request without a deadline.
    #[must_use]
    pub fn new(
        resource_id: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            date: date.into(),
            time: time.into(),
            deadline_ms: None,
        }
    }

    /// Attach an absolute deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline_ms: u128) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }
}

/// Orchestrates booking and cancellation requests.
///
/// Resolves the session, validates the request and the resource, then
/// delegates to the ledger. Ledger failures pass through unchanged: a
/// `SlotTaken` is terminal for the attempt and is never retried here.
pub struct BookingService {
    sessions: Arc<SessionManager>,
    catalog: Arc<ResourceCatalog>,
    ledger: Arc<ReservationLedger>,
}

impl BookingService {
    /// Wire the service over its collaborators.
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

    /// Submit a booking.
    ///
    /// # Errors
    /// `DeadlineExpired` when the request's deadline passed before any key
    /// was touched; `NotAuthenticated` without a live session; `InvalidSlot`
    /// on malformed labels; `UnknownResource`; `SlotTaken`; `Store`.
    pub fn submit_booking(
        &self,
        token: &SessionToken,
        req: &BookingRequest,
    ) -> Result<Booking, BookingError> {
        let (username, date, time) = self.admit(token, req)?;
        self.ledger.reserve(&username, &req.resource_id, date, time)
    }

    /// Submit a cancellation for a slot the caller owns.
    ///
    /// # Errors
    /// As [`submit_booking`](Self::submit_booking), plus `NotFound` /
    /// `NotOwner` from the ledger.
    pub fn submit_cancellation(
        &self,
        token: &SessionToken,
        req: &BookingRequest,
    ) -> Result<(), BookingError> {
        let (username, date, time) = self.admit(token, req)?;
        let key = SlotKey::new(req.resource_id.clone(), date, time);
        self.ledger.cancel(&username, &key)
    }

    /// Shared admission gate: deadline, session, label validation, resource
    /// existence. Runs entirely before any ledger key is touched.
    fn admit(
        &self,
        token: &SessionToken,
        req: &BookingRequest,
    ) -> Result<(String, SlotDate, SlotTime), BookingError> {
        if let Some(deadline) = req.deadline_ms {
            if now_ms() > deadline {
                warn!(resource = %req.resource_id, "request expired before admission");
                return Err(BookingError::DeadlineExpired);
            }
        }
        let username = self
            .sessions
            .current_user(token)
            .ok_or(BookingError::NotAuthenticated)?;
        let date = SlotDate::parse(&req.date)?;
        let time = SlotTime::parse(&req.time)?;
        if self.catalog.get(&req.resource_id).is_none() {
            return Err(BookingError::UnknownResource(req.resource_id.clone()));
        }
        Ok((username, date, time))
    }
}
