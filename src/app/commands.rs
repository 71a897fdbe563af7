//! Inbound commands to the application service.
//!
//! These represent actions requested by the presentation layer (slot
//! buttons, the menu page, the add/edit form) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.
//! They are the only way to mutate timers or the catalog.

use crate::bank::SlotId;
use crate::catalog::{CookTime, MenuId};
use crate::error::ValidationError;

/// Cook time as entered in the add/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookInput {
    /// Total seconds.
    Secs(u32),
    /// Separate minutes and seconds fields; seconds must be 0..=59.
    Parts { minutes: u32, seconds: u32 },
    /// Free text, `MM:SS` or bare seconds.
    Text(String),
}

impl CookInput {
    pub fn resolve(&self) -> Result<CookTime, ValidationError> {
        match self {
            Self::Secs(secs) => CookTime::from_secs(*secs),
            Self::Parts { minutes, seconds } => CookTime::from_parts(*minutes, *seconds),
            Self::Text(raw) => CookTime::parse(raw),
        }
    }
}

/// Commands the presentation layer can send into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    // ── Timers ────────────────────────────────────────────────
    /// "Select Menu" tapped on a slot.
    RequestSelection(SlotId),

    /// Menu chosen for the pending slot, by catalog id.  The entry's
    /// values at this moment are what gets bound.
    CommitSelection(MenuId),

    /// Menu page closed without choosing.
    CancelSelection,

    /// Stop a running countdown, or acknowledge a finished one.
    Stop(SlotId),

    // ── Catalog ───────────────────────────────────────────────
    AddMenu { name: String, cook: CookInput },

    EditMenu {
        id: MenuId,
        name: String,
        cook: CookInput,
    },

    DeleteMenu(MenuId),

    // ── Press gestures on catalog entries ─────────────────────
    /// Finger/mouse down on an entry.
    PressMenu { id: MenuId, at_ms: u32 },

    /// Finger/mouse up.
    ReleaseMenu { at_ms: u32 },

    /// Context-menu (right click) on an entry.
    SecondaryMenu(MenuId),

    /// Pointer left the entry mid-press.
    CancelPress,
}
