//! Timer configuration parameters
//!
//! All tunable parameters for the fryer timer.
//! Values can be overridden through the [`ConfigPort`](crate::app::ports::ConfigPort).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core timer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    // --- Timing ---
    /// Scheduler period (milliseconds). One tick removes one second from
    /// every running countdown regardless of this value.
    pub tick_interval_ms: u32,
    /// Hold time (milliseconds) after which a press on a menu entry
    /// becomes an edit request instead of a selection.
    pub long_press_ms: u32,

    // --- Storage ---
    /// Key-value namespace holding the catalog and this config.
    pub storage_namespace: String,
    /// Key the ordered menu list is stored under.
    pub catalog_key: String,

    // --- Notification ---
    /// Ring the completion notifier when a countdown reaches zero.
    pub notify_on_done: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000, // 1 Hz
            long_press_ms: 800,

            storage_namespace: "kitchen".to_string(),
            catalog_key: "kitchenTimer-menuList".to_string(),

            notify_on_done: true,
        }
    }
}

/// Range-check every field before the config is used or persisted.
pub fn validate_config(cfg: &TimerConfig) -> Result<(), ConfigError> {
    if !(10..=60_000).contains(&cfg.tick_interval_ms) {
        return Err(ConfigError::ValidationFailed(
            "tick_interval_ms must be 10..=60000",
        ));
    }
    if !(100..=5_000).contains(&cfg.long_press_ms) {
        return Err(ConfigError::ValidationFailed(
            "long_press_ms must be 100..=5000",
        ));
    }
    if cfg.storage_namespace.trim().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "storage_namespace must not be empty",
        ));
    }
    if cfg.catalog_key.trim().is_empty() {
        return Err(ConfigError::ValidationFailed("catalog_key must not be empty"));
    }
    Ok(())
}
