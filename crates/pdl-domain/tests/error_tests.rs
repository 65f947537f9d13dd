//! Unit tests for domain error types

use pdl_domain::{Error, LockId};
use std::error::Error as StdError;

#[test]
fn test_connection_error() {
    let error = Error::connection("database unreachable");
    match &error {
        Error::Connection { message, source } => {
            assert_eq!(message, "database unreachable");
            assert!(source.is_none());
        }
        _ => panic!("Expected Connection error"),
    }
    assert!(error.is_fatal_to_session());
}

#[test]
fn test_connection_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = Error::connection_with("could not reach 127.0.0.1:5432", io);
    let display = format!("{}", error);
    assert!(display.contains("could not reach 127.0.0.1:5432"));
    assert!(error.source().is_some());
}

#[test]
fn test_session_error_is_not_fatal() {
    let error = Error::session("request failed mid-session");
    match &error {
        Error::Session { message, .. } => assert_eq!(message, "request failed mid-session"),
        _ => panic!("Expected Session error"),
    }
    assert!(!error.is_fatal_to_session());
}

#[test]
fn test_critical_section_error_without_release_failure() {
    let cause = std::io::Error::other("job exploded");
    let error = Error::critical_section(LockId::new(42), cause, None);
    match &error {
        Error::CriticalSection {
            lock_id, release, ..
        } => {
            assert_eq!(*lock_id, LockId::new(42));
            assert!(release.is_none());
        }
        _ => panic!("Expected CriticalSection error"),
    }
    assert!(error.release_failure().is_none());
    let display = format!("{}", error);
    assert!(display.contains("42"));
    assert!(display.contains("job exploded"));
}

#[test]
fn test_critical_section_error_keeps_release_failure_secondary() {
    let cause = std::io::Error::other("job exploded");
    let release = Error::session("unlock request failed");
    let error = Error::critical_section(LockId::new(7), cause, Some(release));

    // The critical-section failure is the primary cause; the release
    // failure is attached, not substituted.
    let display = format!("{}", error);
    assert!(display.contains("job exploded"));
    match error.release_failure() {
        Some(Error::Session { message, .. }) => assert_eq!(message, "unlock request failed"),
        other => panic!("Expected secondary Session error, got {:?}", other),
    }
}

#[test]
fn test_release_error_after_success() {
    let error = Error::release(LockId::new(9), Error::session("unlock request failed"));
    match &error {
        Error::Release { lock_id, source } => {
            assert_eq!(*lock_id, LockId::new(9));
            assert!(matches!(**source, Error::Session { .. }));
        }
        _ => panic!("Expected Release error"),
    }
    assert!(error.source().is_some());
}

#[test]
fn test_config_error() {
    let error = Error::config("port must be greater than zero");
    let display = format!("{}", error);
    assert!(display.contains("Configuration error"));
    assert!(display.contains("port must be greater than zero"));
}

#[test]
fn test_infrastructure_error_with_source() {
    let io = std::io::Error::other("disk on fire");
    let error = Error::infrastructure_with("could not persist state", io);
    match &error {
        Error::Infrastructure { message, source } => {
            assert_eq!(message, "could not persist state");
            assert!(source.is_some());
        }
        _ => panic!("Expected Infrastructure error"),
    }
}

#[test]
fn test_release_failure_accessor_only_applies_to_critical_section() {
    let error = Error::release(LockId::new(1), Error::session("boom"));
    assert!(error.release_failure().is_none());
}
