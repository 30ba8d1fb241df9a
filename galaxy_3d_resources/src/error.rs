//! Error types for the Galaxy3D resource core
//!
//! This module defines the error types used by the memory layer, the hash
//! index and the resource caches.

use std::fmt;

/// Result type for Galaxy3D resource operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D resource errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (renderer refused a resource, etc.)
    BackendError(String),

    /// Initialization failed (misconfiguration, wrong block size, ...)
    InitializationFailed(String),

    /// An argument was rejected before any state was touched
    InvalidArgument(String),

    /// Invalid resource (unknown handle, bad name, ...)
    InvalidResource(String),

    /// A fixed-capacity structure has no room left
    CapacityExhausted(String),

    /// An arena could not satisfy an allocation
    ArenaExhausted {
        /// Bytes requested by the caller
        requested: usize,
        /// Bytes still available in the arena
        remaining: usize,
    },

    /// A configuration source could not be read or parsed
    ConfigError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::CapacityExhausted(msg) => write!(f, "Capacity exhausted: {}", msg),
            Error::ArenaExhausted { requested, remaining } => write!(
                f,
                "Arena exhausted: requested {}B, only {}B remaining",
                requested, remaining
            ),
            Error::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
