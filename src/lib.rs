//! # Slotkeeper
//!
//! A concurrency-safe slot reservation engine for shared community venues.
//!
//! Registered users reserve a time slot at a shared physical resource (a
//! community hall) for a specific date and time. The engine's one hard
//! invariant: no two live bookings may collide on the same
//! `(resource, date, time)` triple. A naive read-then-write over a shared
//! collection lets two concurrent requests both observe "free" and both
//! insert; this engine closes that window structurally with an atomic
//! check-and-insert on the composite key.
//!
//! ## Architecture
//!
//! - **Record stores**: resources, accounts, and bookings each sit on a
//!   narrow keyed-store contract (get, list, atomic insert-if-absent, atomic
//!   delete-if-owner). A sharded in-memory backend gives per-key parallelism;
//!   a JSON-file backend matches flat-file deployments behind an explicit
//!   mutual-exclusion layer.
//! - **ReservationLedger**: the authoritative set of live bookings plus a
//!   per-user index; the only path that mutates them.
//! - **Services**: `AuthFlow` (register/login/logout with tokens issued by
//!   `SessionManager`), `BookingService` (booking/cancellation orchestration),
//!   and `QueryFacade` (read-side views). Credential hashing sits behind the
//!   `AuthService` capability; an Argon2 adapter ships in `infra`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use slotkeeper::builders::build_engine;
//! use slotkeeper::config::EngineConfig;
//! use slotkeeper::service::{BookingRequest, Registration};
//!
//! let engine = build_engine(&EngineConfig::default())?;
//! engine.auth.register(&Registration { /* ... */ })?;
//! let token = engine.auth.login("alice", "secret")?;
//! let booking = engine
//!     .booking
//!     .submit_booking(&token, &BookingRequest::new("c1", "2024-06-01", "10:00"))?;
//! ```
//!
//! Failures are typed, user-facing outcomes ([`core::BookingError`]); a lost
//! reserve race is `SlotTaken`, terminal for that attempt, never retried by
//! the engine.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core booking abstractions: entities, stores, catalog, accounts, ledger.
pub mod core;
/// Configuration models for the engine and its backends.
pub mod config;
/// Builders to construct engine components from configuration.
pub mod builders;
/// Infrastructure adapters for record stores and credentials.
pub mod infra;
/// Service surface consumed by an outer request-handling layer.
pub mod service;
/// Shared utilities.
pub mod util;
