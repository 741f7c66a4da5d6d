//! End-to-end booking flows through the assembled engine.
//!
//! Covers the full surface an embedding layer consumes: register, login,
//! book, view, availability, cancel, logout, plus every user-facing failure
//! on those paths.

use std::sync::Arc;

use slotkeeper::builders::{build_engine, build_engine_with, BookingEngine};
use slotkeeper::config::{EngineConfig, StoreBackendConfig};
use slotkeeper::core::{AuthService, BookingError, CredentialHandle};
use slotkeeper::service::{BookingRequest, Registration};

/// Cheap stand-in for the argon2 adapter; flows under test don't care how
/// handles are derived.
struct PlainAuth;

impl AuthService for PlainAuth {
    fn hash(&self, secret: &str) -> anyhow::Result<CredentialHandle> {
        Ok(CredentialHandle::new(format!("plain:{secret}")))
    }

    fn verify(&self, handle: &CredentialHandle, secret: &str) -> bool {
        handle.expose() == format!("plain:{secret}")
    }
}

fn engine() -> BookingEngine {
    build_engine_with(&EngineConfig::default(), Arc::new(PlainAuth)).unwrap()
}

fn registration(username: &str, password: &str) -> Registration {
    Registration {
        fullname: "Test User".into(),
        username: username.into(),
        email: format!("{username}@example.com"),
        phone: "555-0100".into(),
        password: password.into(),
        confirm_password: password.into(),
    }
}

#[test]
fn reserve_conflict_cancel_rebook() {
    let engine = engine();
    engine.auth.register(&registration("alice", "pw-a")).unwrap();
    engine.auth.register(&registration("bob", "pw-b")).unwrap();
    let alice = engine.auth.login("alice", "pw-a").unwrap();
    let bob = engine.auth.login("bob", "pw-b").unwrap();

    let slot = BookingRequest::new("c1", "2024-06-01", "10:00");

    let booking = engine.booking.submit_booking(&alice, &slot).unwrap();
    assert_eq!(booking.username, "alice");
    assert_eq!(booking.resource_id, "c1");

    let err = engine.booking.submit_booking(&bob, &slot).unwrap_err();
    assert!(matches!(err, BookingError::SlotTaken));

    engine.booking.submit_cancellation(&alice, &slot).unwrap();

    let rebooked = engine.booking.submit_booking(&bob, &slot).unwrap();
    assert_eq!(rebooked.username, "bob");
}

#[test]
fn duplicate_registration_is_rejected() {
    let engine = engine();
    engine.auth.register(&registration("alice", "first")).unwrap();
    let err = engine
        .auth
        .register(&registration("alice", "second"))
        .unwrap_err();
    assert!(matches!(err, BookingError::DuplicateUsername(u) if u == "alice"));

    // The original credential still wins: count and content unchanged.
    assert!(engine.auth.login("alice", "second").is_err());
    engine.auth.login("alice", "first").unwrap();
}

#[test]
fn registration_requires_matching_confirmation() {
    let engine = engine();
    let mut req = registration("alice", "pw");
    req.confirm_password = "other".into();
    let err = engine.auth.register(&req).unwrap_err();
    assert!(matches!(err, BookingError::PasswordMismatch));
    assert!(engine.accounts.find("alice").unwrap().is_none());
}

#[test]
fn login_failures_are_uniform() {
    let engine = engine();
    engine.auth.register(&registration("alice", "pw")).unwrap();

    let wrong_pw = engine.auth.login("alice", "nope").unwrap_err();
    let unknown = engine.auth.login("nobody", "pw").unwrap_err();
    assert!(matches!(wrong_pw, BookingError::InvalidCredentials));
    assert!(matches!(unknown, BookingError::InvalidCredentials));
}

#[test]
fn logout_invalidates_the_session() {
    let engine = engine();
    engine.auth.register(&registration("alice", "pw")).unwrap();
    let token = engine.auth.login("alice", "pw").unwrap();

    engine.auth.logout(&token);
    // Logout is idempotent.
    engine.auth.logout(&token);

    let err = engine
        .booking
        .submit_booking(&token, &BookingRequest::new("c1", "2024-06-01", "10:00"))
        .unwrap_err();
    assert!(matches!(err, BookingError::NotAuthenticated));
    let err = engine.query.my_bookings(&token).unwrap_err();
    assert!(matches!(err, BookingError::NotAuthenticated));
}

#[test]
fn booking_rejects_unknown_resources_and_bad_labels() {
    let engine = engine();
    engine.auth.register(&registration("alice", "pw")).unwrap();
    let token = engine.auth.login("alice", "pw").unwrap();

    let err = engine
        .booking
        .submit_booking(&token, &BookingRequest::new("c99", "2024-06-01", "10:00"))
        .unwrap_err();
    assert!(matches!(err, BookingError::UnknownResource(id) if id == "c99"));

    let err = engine
        .booking
        .submit_booking(&token, &BookingRequest::new("c1", "June 1st", "10:00"))
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidSlot(_)));

    let err = engine
        .booking
        .submit_booking(&token, &BookingRequest::new("c1", "2024-06-01", "ten"))
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidSlot(_)));

    assert!(engine.query.my_bookings(&token).unwrap().is_empty());
}

#[test]
fn cancellation_failures_leave_bookings_alone() {
    let engine = engine();
    engine.auth.register(&registration("alice", "pw-a")).unwrap();
    engine.auth.register(&registration("bob", "pw-b")).unwrap();
    let alice = engine.auth.login("alice", "pw-a").unwrap();
    let bob = engine.auth.login("bob", "pw-b").unwrap();

    let slot = BookingRequest::new("c1", "2024-06-01", "10:00");
    engine.booking.submit_booking(&alice, &slot).unwrap();

    let err = engine.booking.submit_cancellation(&bob, &slot).unwrap_err();
    assert!(matches!(err, BookingError::NotOwner));
    assert_eq!(engine.query.my_bookings(&alice).unwrap().len(), 1);

    let other = BookingRequest::new("c1", "2024-06-01", "11:00");
    let err = engine
        .booking
        .submit_cancellation(&alice, &other)
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound));
}

#[test]
fn availability_reports_taken_times_only_for_that_resource_and_date() {
    let engine = engine();
    engine.auth.register(&registration("alice", "pw")).unwrap();
    let token = engine.auth.login("alice", "pw").unwrap();

    for (resource, date, time) in [
        ("c1", "2024-06-01", "10:00"),
        ("c1", "2024-06-01", "14:00"),
        ("c1", "2024-06-02", "09:00"),
        ("c2", "2024-06-01", "10:00"),
    ] {
        engine
            .booking
            .submit_booking(&token, &BookingRequest::new(resource, date, time))
            .unwrap();
    }

    let taken = engine.query.availability("c1", "2024-06-01").unwrap();
    let labels: Vec<&str> = taken.iter().map(slotkeeper::core::SlotTime::as_str).collect();
    assert_eq!(labels, ["10:00", "14:00"]);

    let err = engine.query.availability("c99", "2024-06-01").unwrap_err();
    assert!(matches!(err, BookingError::UnknownResource(_)));
}

#[test]
fn my_bookings_reads_are_idempotent_and_chronological() {
    let engine = engine();
    engine.auth.register(&registration("alice", "pw")).unwrap();
    let token = engine.auth.login("alice", "pw").unwrap();

    for (resource, date, time) in [
        ("c2", "2024-06-02", "09:00"),
        ("c1", "2024-06-01", "14:00"),
        ("c1", "2024-06-01", "10:00"),
    ] {
        engine
            .booking
            .submit_booking(&token, &BookingRequest::new(resource, date, time))
            .unwrap();
    }

    let first = engine.query.my_bookings(&token).unwrap();
    let second = engine.query.my_bookings(&token).unwrap();
    let slots: Vec<String> = first.iter().map(|b| b.slot().to_string()).collect();
    assert_eq!(
        slots,
        ["c1/2024-06-01/10:00", "c1/2024-06-01/14:00", "c2/2024-06-02/09:00"]
    );
    let second_slots: Vec<String> = second.iter().map(|b| b.slot().to_string()).collect();
    assert_eq!(slots, second_slots);
}

#[test]
fn expired_deadline_rejects_before_any_mutation() {
    let engine = engine();
    engine.auth.register(&registration("alice", "pw")).unwrap();
    let token = engine.auth.login("alice", "pw").unwrap();

    let stale = BookingRequest::new("c1", "2024-06-01", "10:00").with_deadline(1);
    let err = engine.booking.submit_booking(&token, &stale).unwrap_err();
    assert!(matches!(err, BookingError::DeadlineExpired));
    assert!(engine.query.availability("c1", "2024-06-01").unwrap().is_empty());

    let live = BookingRequest::new("c1", "2024-06-01", "10:00")
        .with_deadline(slotkeeper::util::now_ms() + 60_000);
    engine.booking.submit_booking(&token, &live).unwrap();
}

#[test]
fn default_catalog_is_seeded_once() {
    let engine = engine();
    let ids: Vec<&str> = engine.catalog.list().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["c1", "c2", "c3"]);
    assert_eq!(engine.catalog.get("c2").unwrap().location, "Chittagong");
}

#[test]
fn json_file_backend_survives_engine_rebuild() {
    let data_dir = std::env::temp_dir()
        .join("slotkeeper-tests")
        .join(uuid::Uuid::new_v4().to_string());
    let cfg = EngineConfig {
        store: StoreBackendConfig::JsonFile,
        data_dir: Some(data_dir.clone()),
        ..EngineConfig::default()
    };

    {
        let engine = build_engine_with(&cfg, Arc::new(PlainAuth)).unwrap();
        engine.auth.register(&registration("alice", "pw")).unwrap();
        let token = engine.auth.login("alice", "pw").unwrap();
        engine
            .booking
            .submit_booking(&token, &BookingRequest::new("c1", "2024-06-01", "10:00"))
            .unwrap();
    }

    // Same files, fresh process: catalog, account, and booking all survive;
    // sessions deliberately do not.
    let engine = build_engine_with(&cfg, Arc::new(PlainAuth)).unwrap();
    assert_eq!(engine.catalog.list().len(), 3);
    assert!(engine.accounts.find("alice").unwrap().is_some());

    let token = engine.auth.login("alice", "pw").unwrap();
    assert_eq!(engine.query.my_bookings(&token).unwrap().len(), 1);
    let err = engine
        .booking
        .submit_booking(&token, &BookingRequest::new("c1", "2024-06-01", "10:00"))
        .unwrap_err();
    assert!(matches!(err, BookingError::SlotTaken));

    std::fs::remove_dir_all(&data_dir).ok();
}

#[test]
fn stock_argon2_adapter_registers_and_logs_in() {
    let engine = build_engine(&EngineConfig::default()).unwrap();
    engine.auth.register(&registration("alice", "Secur3!")).unwrap();

    assert!(engine.auth.login("alice", "wrong").is_err());
    let token = engine.auth.login("alice", "Secur3!").unwrap();
    engine
        .booking
        .submit_booking(&token, &BookingRequest::new("c1", "2024-06-01", "10:00"))
        .unwrap();

    // Stored handle is opaque, not the raw password.
    let account = engine.accounts.find("alice").unwrap().unwrap();
    assert_ne!(account.credential.expose(), "Secur3!");
}
