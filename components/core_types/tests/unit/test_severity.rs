//! Unit tests for Severity

use core_types::Severity;

#[test]
fn test_severity_ordering() {
    assert!(Severity::Error > Severity::Warning);
    assert!(Severity::Warning > Severity::Info);
}

#[test]
fn test_severity_from_code_prefix() {
    assert_eq!(Severity::from_code("E041"), Severity::Error);
    assert_eq!(Severity::from_code("W090"), Severity::Warning);
    assert_eq!(Severity::from_code("I001"), Severity::Info);
}

#[test]
fn test_severity_display() {
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Warning.to_string(), "warning");
    assert_eq!(Severity::Info.to_string(), "info");
}

#[test]
fn test_severity_round_trips_through_json() {
    let json = serde_json::to_string(&Severity::Warning).unwrap();
    let back: Severity = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Severity::Warning);
}
