//! Timer bank: the fixed table of six fryer slots.
//!
//! Slots are created once, numbered 1..=6, and never added, removed, or
//! renumbered.  The bank fans a single scheduler tick out to every slot and
//! fires the completion notification for each slot that reaches zero
//! before `tick` returns.

use core::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::app::ports::NotificationPort;
use crate::catalog::{MenuEntry, format_mm_ss};
use crate::fsm::context::MenuBinding;
use crate::fsm::{SlotStatus, TimerSlot};

/// Number of fryer slots.  Fixed for the lifetime of the process.
pub const SLOT_COUNT: usize = 6;

// ═══════════════════════════════════════════════════════════════
//  Slot identity
// ═══════════════════════════════════════════════════════════════

/// One-based slot number, always in `1..=SLOT_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SlotId(u8);

impl SlotId {
    /// Returns `None` for anything outside `1..=SLOT_COUNT`.
    pub fn new(n: u8) -> Option<Self> {
        (1..=SLOT_COUNT as u8).contains(&n).then_some(Self(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based table index.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Every slot id in display order.
    pub fn all() -> impl Iterator<Item = SlotId> {
        (1..=SLOT_COUNT as u8).map(SlotId)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Read-only views
// ═══════════════════════════════════════════════════════════════

/// What a renderer needs to draw one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub slot: SlotId,
    pub status: SlotStatus,
    pub menu_name: String,
    pub cook_secs: u32,
    pub remaining_secs: u32,
    pub remaining_display: String,
}

/// Outcome of one bank-wide tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Slots whose countdown moved by one second this tick.
    pub decremented: heapless::Vec<SlotId, SLOT_COUNT>,
    /// Slots that reached zero this tick (subset of `decremented`).
    pub completed: heapless::Vec<SlotId, SLOT_COUNT>,
}

impl TickReport {
    pub fn changed(&self) -> bool {
        !self.decremented.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Bank
// ═══════════════════════════════════════════════════════════════

pub struct TimerBank {
    slots: [TimerSlot; SLOT_COUNT],
}

impl TimerBank {
    /// All six slots in `Ready`.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|i| TimerSlot::new(SlotId(i as u8 + 1))),
        }
    }

    pub fn slot(&self, id: SlotId) -> &TimerSlot {
        &self.slots[id.index()]
    }

    pub fn status(&self, id: SlotId) -> SlotStatus {
        self.slot(id).status()
    }

    // ── Transitions ───────────────────────────────────────────

    /// Bind a copy of `entry` into a `Ready` slot and start its countdown.
    ///
    /// Returns `false` (no change) if the slot is not `Ready`.
    pub fn select_menu(&mut self, id: SlotId, entry: &MenuEntry) -> bool {
        let accepted = self.slots[id.index()].bind(MenuBinding::from(entry));
        if !accepted {
            debug!(
                "Bank: select '{}' on slot {} ignored ({})",
                entry.name,
                id,
                self.status(id)
            );
        }
        accepted
    }

    /// Return a slot to `Ready` and clear its binding.  Valid from any
    /// state; calling it twice is the same as calling it once.
    pub fn stop(&mut self, id: SlotId) {
        self.slots[id.index()].reset();
    }

    /// Advance every running countdown by one second.
    ///
    /// Slots are updated independently; a notifier failure for one slot
    /// is logged and the remaining slots still tick.
    pub fn tick(&mut self, notifier: &mut impl NotificationPort) -> TickReport {
        let mut report = TickReport::default();

        for slot in &mut self.slots {
            let was_running = slot.status() == SlotStatus::InProgress;
            let before = slot.context().remaining_secs;
            slot.tick();

            if was_running && slot.context().remaining_secs != before {
                // Capacity equals the slot count; cannot overflow.
                let _ = report.decremented.push(slot.id());
            }

            if slot.take_completion() {
                let _ = report.completed.push(slot.id());
                if let Err(e) = notifier.notify_completion(slot.id()) {
                    warn!("Bank: completion notify for slot {} failed: {}", slot.id(), e);
                }
            }
        }

        report
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn view(&self, id: SlotId) -> SlotView {
        let slot = self.slot(id);
        let ctx = slot.context();
        SlotView {
            slot: id,
            status: slot.status(),
            menu_name: ctx.bound_name().to_string(),
            cook_secs: ctx.bound_cook_secs(),
            remaining_secs: ctx.remaining_secs,
            remaining_display: format_mm_ss(ctx.remaining_secs),
        }
    }

    pub fn views(&self) -> [SlotView; SLOT_COUNT] {
        core::array::from_fn(|i| self.view(SlotId(i as u8 + 1)))
    }

    /// Number of slots currently counting down.
    pub fn running_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.status() == SlotStatus::InProgress)
            .count()
    }
}

impl Default for TimerBank {
    fn default() -> Self {
        Self::new()
    }
}
