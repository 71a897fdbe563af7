//! Press-gesture disambiguation for catalog entries.
//!
//! One press on a menu entry ends in exactly one of two outcomes:
//!
//! | Gesture          | Condition                          | Outcome  |
//! |------------------|------------------------------------|----------|
//! | Tap              | Released before the hold threshold | `Select` |
//! | Long press       | Held >= threshold (fires at once)  | `Edit`   |
//! | Secondary click  | Context-menu activation            | `Edit`   |
//!
//! The caller feeds timestamps (milliseconds, any monotonic origin);
//! [`PressTracker::poll`] should run at least every few hundred ms so a
//! long press is reported while the finger is still down.

use log::debug;

use crate::catalog::MenuId;

/// Default hold threshold.
pub const LONG_PRESS_MS: u32 = 800;

/// What a finished gesture asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// Choose this menu for the slot awaiting selection.
    Select(MenuId),
    /// Open the edit form for this menu.
    Edit(MenuId),
}

/// Internal state machine for gesture detection.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PressState {
    Idle,
    Held { id: MenuId, since_ms: u32 },
    /// Long press already reported; waiting for the release.
    Consumed,
}

#[derive(Debug, Clone)]
pub struct PressTracker {
    threshold_ms: u32,
    state: PressState,
}

impl PressTracker {
    pub fn new(threshold_ms: u32) -> Self {
        Self {
            threshold_ms,
            state: PressState::Idle,
        }
    }

    pub fn threshold_ms(&self) -> u32 {
        self.threshold_ms
    }

    /// Finger down on `id`.  A press already in flight is abandoned.
    pub fn press(&mut self, id: MenuId, now_ms: u32) {
        self.state = PressState::Held { id, since_ms: now_ms };
    }

    /// Report `Edit` once the hold threshold has elapsed.
    pub fn poll(&mut self, now_ms: u32) -> Option<PressOutcome> {
        match &self.state {
            PressState::Held { id, since_ms }
                if now_ms.wrapping_sub(*since_ms) >= self.threshold_ms =>
            {
                let id = id.clone();
                debug!("Press: long hold on {}", id);
                self.state = PressState::Consumed;
                Some(PressOutcome::Edit(id))
            }
            _ => None,
        }
    }

    /// Finger up.  `Select` if released before the threshold; `Edit` if
    /// the threshold passed without a poll; nothing if `Edit` was already
    /// reported or no press was in flight.
    pub fn release(&mut self, now_ms: u32) -> Option<PressOutcome> {
        if let Some(edit) = self.poll(now_ms) {
            self.state = PressState::Idle;
            return Some(edit);
        }
        match core::mem::replace(&mut self.state, PressState::Idle) {
            PressState::Held { id, .. } => Some(PressOutcome::Select(id)),
            PressState::Idle | PressState::Consumed => None,
        }
    }

    /// Context-menu activation: edit immediately, cancelling any hold.
    pub fn secondary(&mut self, id: MenuId) -> PressOutcome {
        self.state = PressState::Idle;
        PressOutcome::Edit(id)
    }

    /// Pointer left the entry; neither outcome fires.
    pub fn cancel(&mut self) {
        self.state = PressState::Idle;
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.state, PressState::Held { .. })
    }
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new(LONG_PRESS_MS)
    }
}
