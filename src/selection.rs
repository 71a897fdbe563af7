//! Selection coordinator: which slot, if any, is waiting for a menu.
//!
//! Holds at most one pending slot.  A slot becomes pending only while it
//! is `Ready`; committing a menu hands the choice to the bank and clears
//! the pending slot.

use log::{debug, info};

use crate::bank::{SlotId, TimerBank};
use crate::catalog::MenuEntry;
use crate::fsm::SlotStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCoordinator {
    pending: Option<SlotId>,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `slot` as awaiting a menu choice.
    ///
    /// Rejected (returns `false`, pending unchanged) unless the slot is
    /// `Ready`.  A later request for another `Ready` slot replaces the
    /// earlier one.
    pub fn request(&mut self, slot: SlotId, bank: &TimerBank) -> bool {
        let status = bank.status(slot);
        if status != SlotStatus::Ready {
            debug!("Selection: slot {} is {}, request ignored", slot, status);
            return false;
        }
        if let Some(prev) = self.pending.replace(slot) {
            if prev != slot {
                info!("Selection: slot {} replaces pending slot {}", slot, prev);
            }
        } else {
            info!("Selection: slot {} awaiting menu", slot);
        }
        true
    }

    /// Bind `entry` into the pending slot and clear the pending state.
    ///
    /// Returns the slot that was started, or `None` if nothing was pending
    /// or the bank refused the binding.
    pub fn commit(&mut self, entry: &MenuEntry, bank: &mut TimerBank) -> Option<SlotId> {
        let Some(slot) = self.pending.take() else {
            debug!("Selection: commit '{}' with nothing pending", entry.name);
            return None;
        };
        bank.select_menu(slot, entry).then_some(slot)
    }

    /// Abandon the selection without touching the bank.
    pub fn cancel(&mut self) -> Option<SlotId> {
        let prev = self.pending.take();
        if let Some(slot) = prev {
            info!("Selection: slot {} cancelled", slot);
        }
        prev
    }

    pub fn pending(&self) -> Option<SlotId> {
        self.pending
    }
}
