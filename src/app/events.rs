//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: redraw the screen, log, forward.

use serde::Serialize;

use crate::bank::{SLOT_COUNT, SlotId, SlotView};
use crate::catalog::MenuEntry;
use crate::error::ValidationError;
use crate::fsm::SlotStatus;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service is live (carries the initial snapshot).
    Started(Snapshot),

    /// A slot moved between states.
    SlotChanged {
        slot: SlotId,
        from: SlotStatus,
        to: SlotStatus,
    },

    /// A countdown reached zero.
    TimerCompleted(SlotId),

    /// A slot is now waiting for a menu choice.
    SelectionPending(SlotId),

    /// The pending selection was committed or abandoned.
    SelectionCleared,

    /// The catalog was mutated; carries the new entry count.
    CatalogChanged(usize),

    /// A long press or secondary click asked to edit this entry.
    EditRequested(MenuEntry),

    /// A catalog add/edit was refused.
    Rejected(ValidationError),

    /// Full read-only state, emitted after every change.
    Snapshot(Snapshot),
}

/// Everything a renderer needs to draw the screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub slots: [SlotView; SLOT_COUNT],
    pub catalog: Vec<MenuEntry>,
    pub selecting: Option<SlotId>,
}
