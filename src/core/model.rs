//! Typed entities: resources, accounts, bookings, and slot identity.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::store::Record;
use crate::core::BookingError;

/// A bookable resource, immutable after catalog load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Physical location.
    pub location: String,
    /// Seating/standing capacity; always greater than zero.
    pub capacity: u32,
    /// Cost per slot; never negative.
    pub cost: f64,
}

/// A registered user identity, keyed by unique username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique username; the primary key. Matching is case-sensitive.
    pub username: String,
    /// Full display name.
    pub fullname: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Opaque credential handle; see [`CredentialHandle`].
    pub credential: CredentialHandle,
}

/// Opaque credential token managed by the installed `AuthService`.
///
/// The engine never stores or compares raw passwords; this wraps whatever the
/// auth adapter emits (a PHC string for the argon2 adapter). `Debug` output is
/// redacted so handles cannot leak through logs.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CredentialHandle(String);

impl CredentialHandle {
    /// Wrap an adapter-produced handle.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Expose the raw handle for verification by the auth adapter.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CredentialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHandle(..)")
    }
}

/// A validated calendar-date label, `YYYY-MM-DD` shaped.
///
/// Slot identity is exact-match on the label; no calendar arithmetic is
/// performed. The shape check rejects anything a date picker would not emit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotDate(String);

impl SlotDate {
    /// Validate and wrap a date label.
    ///
    /// # Errors
    /// `BookingError::InvalidSlot` when the input is not `YYYY-MM-DD` shaped.
    pub fn parse(input: &str) -> Result<Self, BookingError> {
        let s = input.trim();
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
        if !shaped {
            return Err(BookingError::InvalidSlot(format!(
                "date must be YYYY-MM-DD, got {input:?}"
            )));
        }
        Ok(Self(s.to_owned()))
    }

    /// The underlying label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated time-of-day label, `HH:MM` shaped.
///
/// Two labels identify the same slot only when equal; overlap between
/// intervals such as `10:00` and `10:15` is deliberately not modeled.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotTime(String);

impl SlotTime {
    /// Validate and wrap a time label.
    ///
    /// # Errors
    /// `BookingError::InvalidSlot` when the input is not `HH:MM` shaped.
    pub fn parse(input: &str) -> Result<Self, BookingError> {
        let s = input.trim();
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !shaped {
            return Err(BookingError::InvalidSlot(format!(
                "time must be HH:MM, got {input:?}"
            )));
        }
        Ok(Self(s.to_owned()))
    }

    /// The underlying label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite identity of one bookable unit: `(resource, date, time)`.
///
/// This is the key the ledger serializes conflicting mutations on. Ordering
/// is `(date, time, resource)` so per-user listings come out chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// Resource the slot belongs to.
    pub resource_id: String,
    /// Calendar date of the slot.
    pub date: SlotDate,
    /// Time of day of the slot.
    pub time: SlotTime,
}

impl SlotKey {
    /// Build a key from its parts.
    #[must_use]
    pub fn new(resource_id: impl Into<String>, date: SlotDate, time: SlotTime) -> Self {
        Self {
            resource_id: resource_id.into(),
            date,
            time,
        }
    }
}

impl Ord for SlotKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.date, &self.time, &self.resource_id).cmp(&(
            &other.date,
            &other.time,
            &other.resource_id,
        ))
    }
}

impl PartialOrd for SlotKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.resource_id, self.date, self.time)
    }
}

/// One live reservation of a slot by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Owning username; references a registered [`Account`].
    pub username: String,
    /// Reserved resource; references a cataloged [`Resource`].
    pub resource_id: String,
    /// Reserved date.
    pub date: SlotDate,
    /// Reserved time of day.
    pub time: SlotTime,
    /// Creation timestamp, milliseconds since the Unix epoch.
    pub created_at_ms: u128,
}

impl Booking {
    /// The composite slot identity of this booking.
    #[must_use]
    pub fn slot(&self) -> SlotKey {
        SlotKey {
            resource_id: self.resource_id.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }
}

impl Record for Resource {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn owner(&self) -> &str {
        &self.id
    }
}

impl Record for Account {
    type Key = String;

    fn key(&self) -> String {
        self.username.clone()
    }

    fn owner(&self) -> &str {
        &self.username
    }
}

impl Record for Booking {
    type Key = SlotKey;

    fn key(&self) -> SlotKey {
        self.slot()
    }

    fn owner(&self) -> &str {
        &self.username
    }
}
