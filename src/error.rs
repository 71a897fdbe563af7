//! Unified error types for the fryer timer.
//!
//! A single `Error` enum that every subsystem can convert into.  Only
//! catalog validation ever reaches a caller of the application service;
//! storage and notification failures are swallowed at the port boundary
//! and logged, so they show up here only on the startup path.

use core::fmt;

pub use crate::app::ports::{ConfigError, NotifyError, StorageError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A catalog add/edit was rejected before any mutation happened.
    Validation(ValidationError),
    /// The key-value store failed.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "rejected: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Validation rejections
// ---------------------------------------------------------------------------

/// Why a catalog add/edit was refused.  The `Display` text is meant to be
/// shown to the cook as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty after trimming.
    EmptyName,
    /// Seconds component of a `MM:SS` input was above 59.
    SecondsOutOfRange(u32),
    /// Minutes or seconds component was not a non-negative integer.
    Malformed,
    /// Total cook time resolved to zero seconds.
    ZeroDuration,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Menu name cannot be empty."),
            Self::SecondsOutOfRange(_) | Self::Malformed => {
                write!(f, "Please enter valid minutes and seconds (0-59).")
            }
            Self::ZeroDuration => write!(f, "Total cook time must be greater than zero."),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
