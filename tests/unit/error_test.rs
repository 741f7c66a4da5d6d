//! Tests for error types

use slotkeeper::core::BookingError;

#[test]
fn test_duplicate_username_error() {
    let err = BookingError::DuplicateUsername("alice".to_string());
    assert_eq!(format!("{}", err), "username already exists: alice");
}

#[test]
fn test_slot_taken_error() {
    let err = BookingError::SlotTaken;
    assert_eq!(format!("{}", err), "slot already booked");
}

#[test]
fn test_unknown_resource_error() {
    let err = BookingError::UnknownResource("c99".to_string());
    assert_eq!(format!("{}", err), "unknown resource: c99");
}

#[test]
fn test_not_owner_error() {
    let err = BookingError::NotOwner;
    assert_eq!(format!("{}", err), "booking owned by another user");
}

#[test]
fn test_invalid_credentials_does_not_name_the_field() {
    let err = BookingError::InvalidCredentials;
    assert_eq!(format!("{}", err), "invalid username or password");
}

#[test]
fn test_store_error_carries_context() {
    let err = BookingError::Store("disk full".to_string());
    assert_eq!(format!("{}", err), "store error: disk full");
}
