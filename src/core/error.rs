//! Error types for booking operations.

use thiserror::Error;

/// Typed, user-facing outcomes produced by the engine.
///
/// Every variant except [`BookingError::Store`] is a recoverable, terminal
/// answer to the attempt that produced it; none aborts the process. Logical
/// conflicts (`SlotTaken`, `DuplicateUsername`) must never be retried by the
/// engine itself.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Registration collided with an existing username (case-sensitive).
    #[error("username already exists: {0}")]
    DuplicateUsername(String),
    /// Registration supplied a password and confirmation that differ.
    #[error("passwords do not match")]
    PasswordMismatch,
    /// Login failed; whether the username or the password was wrong is
    /// deliberately not revealed.
    #[error("invalid username or password")]
    InvalidCredentials,
    /// The session token is missing, expired, or was never issued.
    #[error("not authenticated")]
    NotAuthenticated,
    /// The resource id does not exist in the catalog.
    #[error("unknown resource: {0}")]
    UnknownResource(String),
    /// The username does not reference a registered account.
    #[error("unknown user: {0}")]
    UnknownUser(String),
    /// The requested slot is already held by a live booking.
    #[error("slot already booked")]
    SlotTaken,
    /// No live booking exists for the requested slot.
    #[error("booking not found")]
    NotFound,
    /// The booking exists but belongs to another user.
    #[error("booking owned by another user")]
    NotOwner,
    /// A date or time label failed structural validation.
    #[error("invalid slot field: {0}")]
    InvalidSlot(String),
    /// The caller-supplied deadline passed before the request touched the
    /// ledger; nothing was mutated.
    #[error("request deadline expired")]
    DeadlineExpired,
    /// Backing store failure with context. The only infrastructure variant;
    /// boundaries may retry these with backoff.
    #[error("store error: {0}")]
    Store(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
