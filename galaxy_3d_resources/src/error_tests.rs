//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("material upload refused".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("material upload refused"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("max_count must be > 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("max_count must be > 0"));
}

#[test]
fn test_capacity_exhausted_display() {
    let err = Error::CapacityExhausted("no free material slot".to_string());
    assert_eq!(format!("{}", err), "Capacity exhausted: no free material slot");
}

#[test]
fn test_arena_exhausted_display_reports_both_sizes() {
    let err = Error::ArenaExhausted { requested: 50, remaining: 40 };
    let display = format!("{}", err);
    assert!(display.contains("50B"));
    assert!(display.contains("40B"));
}

#[test]
fn test_config_error_display() {
    let err = Error::ConfigError("unable to open 'brick.mmt'".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Configuration error"));
    assert!(display.contains("brick.mmt"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidArgument("empty key".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug = format!("{:?}", Error::InvalidResource("handle".to_string()));
    assert!(debug.contains("InvalidResource"));

    let debug = format!("{:?}", Error::ArenaExhausted { requested: 1, remaining: 0 });
    assert!(debug.contains("ArenaExhausted"));
    assert!(debug.contains("requested"));
}

#[test]
fn test_error_clone_and_eq() {
    let err1 = Error::ConfigError("bad colour".to_string());
    let err2 = err1.clone();
    assert_eq!(err1, err2);
    assert_ne!(err1, Error::ConfigError("other".to_string()));
}

// ============================================================================
// RESULT ALIAS
// ============================================================================

#[test]
fn test_result_alias_propagates_with_question_mark() {
    fn inner() -> Result<u32> {
        Err(Error::CapacityExhausted("full".to_string()))
    }

    fn outer() -> Result<u32> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(Error::CapacityExhausted(_))));
}
