//! Unit tests for port error types

use core_kernel::PortError;

#[test]
fn test_port_error_not_found_display() {
    let err = PortError::not_found("Claim", "CLM-abc");
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not found: Claim with id CLM-abc");
}

#[test]
fn test_port_error_transient_classification() {
    assert!(PortError::connection("socket closed").is_transient());
    assert!(PortError::Timeout {
        operation: "update_claim".to_string(),
        duration_ms: 5000,
    }
    .is_transient());
    assert!(PortError::ServiceUnavailable {
        service: "postgres".to_string(),
    }
    .is_transient());

    assert!(!PortError::validation("bad input").is_transient());
    assert!(!PortError::conflict("version mismatch").is_transient());
    assert!(!PortError::not_found("Claim", "x").is_transient());
}

#[test]
fn test_port_error_conflict_classification() {
    let err = PortError::conflict("claim version 3 expected, found 4");
    assert!(err.is_conflict());
    assert!(!err.is_not_found());
}
