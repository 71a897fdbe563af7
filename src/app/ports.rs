//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (key-value store, completion chime, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches a file,
//! a speaker, or a screen directly.
//!
//! Failures reported through these ports are swallowed by the core and
//! logged; none of them can abort a tick or roll back a state change.

use crate::bank::SlotId;
use crate::config::TimerConfig;

// ───────────────────────────────────────────────────────────────
// Notification port (domain → speaker / buzzer)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget completion signal.
pub trait NotificationPort {
    /// A countdown reached zero on `slot`.  The outcome is logged and
    /// otherwise ignored.
    fn notify_completion(&mut self, slot: SlotId) -> Result<(), NotifyError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → renderer / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log, screen, socket).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Storage port (domain ↔ key-value store)
// ───────────────────────────────────────────────────────────────

/// Opaque, namespaced key-value blob store.
///
/// Write operations MUST replace the whole value; readers never observe
/// a partially written blob.
pub trait StoragePort {
    /// Read the full value stored under `namespace`/`key`.
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Replace the value stored under `namespace`/`key`.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists [`TimerConfig`].
///
/// Implementations MUST validate before persisting and reject invalid
/// ranges with [`ConfigError::ValidationFailed`] instead of clamping.
pub trait ConfigPort {
    /// Returns [`TimerConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<TimerConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &TimerConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Tick delegate (decouples scheduler from the service)
// ───────────────────────────────────────────────────────────────

/// Callback the [`Scheduler`](crate::scheduler::Scheduler) invokes once
/// per period.  The scheduler knows nothing about slots or catalogs.
pub trait TickDelegate {
    fn on_tick(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Key or namespace contains characters the backend cannot store.
    InvalidKey,
    /// Generic I/O error.
    IoError,
}

/// Errors from [`NotificationPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// No output device is attached.
    Unavailable,
    /// The device rejected the write.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::InvalidKey => write!(f, "invalid key"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "notifier unavailable"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
