//! Per-slot mutable context threaded through every state handler.
//!
//! Holds the bound menu snapshot, the remaining countdown, and the
//! completion flag the bank drains after each tick.

use crate::bank::SlotId;

/// A by-value copy of a catalog entry taken at selection time.
///
/// Once bound, the slot never looks at the catalog again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBinding {
    pub name: String,
    pub cook_secs: u32,
}

impl From<&crate::catalog::MenuEntry> for MenuBinding {
    fn from(entry: &crate::catalog::MenuEntry) -> Self {
        Self {
            name: entry.name.clone(),
            cook_secs: entry.cook_secs,
        }
    }
}

/// The context passed to every slot state handler.
#[derive(Debug, Clone)]
pub struct SlotContext {
    /// Fixed identity of the owning slot.
    pub slot: SlotId,
    /// Menu copied in at selection; `None` while unbound.
    pub binding: Option<MenuBinding>,
    /// Seconds left on the countdown.  Never exceeds the bound cook time.
    pub remaining_secs: u32,
    /// Set on entry to `Done`; cleared by [`TimerSlot::take_completion`](super::TimerSlot::take_completion).
    pub completion_pending: bool,
}

impl SlotContext {
    pub fn new(slot: SlotId) -> Self {
        Self {
            slot,
            binding: None,
            remaining_secs: 0,
            completion_pending: false,
        }
    }

    /// Bound menu name, or `""` when unbound.
    pub fn bound_name(&self) -> &str {
        self.binding.as_ref().map_or("", |b| b.name.as_str())
    }

    /// Bound cook time in seconds, or `0` when unbound.
    pub fn bound_cook_secs(&self) -> u32 {
        self.binding.as_ref().map_or(0, |b| b.cook_secs)
    }

    /// Drop the binding and zero the countdown.
    pub fn clear(&mut self) {
        self.binding = None;
        self.remaining_secs = 0;
        self.completion_pending = false;
    }
}
