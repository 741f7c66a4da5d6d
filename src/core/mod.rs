//! Core booking abstractions: entities, stores, catalog, accounts, ledger.

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod model;
pub mod store;

pub use accounts::{AccountStore, AuthService};
pub use catalog::ResourceCatalog;
pub use error::{AppResult, BookingError};
pub use ledger::ReservationLedger;
pub use model::{Account, Booking, CredentialHandle, Resource, SlotDate, SlotKey, SlotTime};
pub use store::{Record, RecordStore, RemoveOutcome, StoreError};
