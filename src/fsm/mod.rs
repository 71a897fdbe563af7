//! Function-pointer finite state machine for a single timer slot.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  STATE_TABLE                                             │
//! │  ┌────────────┬───────────┬──────────┬────────────────┐  │
//! │  │ SlotStatus │ on_enter  │ on_exit  │ on_tick        │  │
//! │  ├────────────┼───────────┼──────────┼────────────────┤  │
//! │  │ Ready      │ fn(ctx)   │ -        │ fn(ctx)->Opt<> │  │
//! │  │ Set        │ -         │ -        │ fn(ctx)->Opt<> │  │
//! │  │ InProgress │ fn(ctx)   │ -        │ fn(ctx)->Opt<> │  │
//! │  │ Done       │ fn(ctx)   │ -        │ fn(ctx)->Opt<> │  │
//! │  └────────────┴───────────┴──────────┴────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each scheduler tick the slot calls `on_tick` for its **current** state.
//! If it returns `Some(next)`, the slot runs `on_exit` for the current
//! state, then `on_enter` for the next, and updates the current pointer.
//! User actions go through [`TimerSlot::bind`] and [`TimerSlot::reset`]
//! so they take effect immediately, never deferred to the next tick.
//! Those are the only ways in from outside, so a slot counts down only
//! with a non-zero binding.

pub mod context;
pub mod states;

use core::fmt;

use context::{MenuBinding, SlotContext};
use log::info;
use serde::Serialize;

use crate::bank::SlotId;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Lifecycle of one timer slot.
///
/// `Set` (menu bound, not counting) is part of the model but no current
/// transition enters it: choosing a menu starts the countdown at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum SlotStatus {
    Ready = 0,
    Set = 1,
    InProgress = 2,
    Done = 3,
}

impl SlotStatus {
    /// Number of states; sizes the table array.
    pub const COUNT: usize = 4;

    /// Convert an index back to `SlotStatus`.  Panics on out-of-range in
    /// debug builds; returns `Ready` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Ready,
            1 => Self::Set,
            2 => Self::InProgress,
            3 => Self::Done,
            _ => {
                debug_assert!(false, "invalid slot state index: {idx}");
                Self::Ready
            }
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(states::STATE_TABLE[*self as usize].name)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn = fn(&mut SlotContext);

/// Signature for the per-tick handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateTickFn = fn(&mut SlotContext) -> Option<SlotStatus>;

/// Static descriptor for a single slot state.
pub struct StateDescriptor {
    pub id: SlotStatus,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_tick: StateTickFn,
}

// ---------------------------------------------------------------------------
// Slot engine
// ---------------------------------------------------------------------------

/// One countdown unit: a state pointer into the shared table plus the
/// slot's own context.
pub struct TimerSlot {
    table: &'static [StateDescriptor; SlotStatus::COUNT],
    current: usize,
    ctx: SlotContext,
}

impl TimerSlot {
    /// New slot in `Ready`, nothing bound.
    pub fn new(id: SlotId) -> Self {
        Self {
            table: &states::STATE_TABLE,
            current: SlotStatus::Ready as usize,
            ctx: SlotContext::new(id),
        }
    }

    pub fn id(&self) -> SlotId {
        self.ctx.slot
    }

    pub fn status(&self) -> SlotStatus {
        SlotStatus::from_index(self.current)
    }

    pub fn context(&self) -> &SlotContext {
        &self.ctx
    }

    /// Copy `binding` into the slot and start counting down.
    ///
    /// Only a `Ready` slot accepts a binding, and only with a non-zero cook
    /// time; anything else is a no-op and returns `false`.
    pub fn bind(&mut self, binding: MenuBinding) -> bool {
        if self.status() != SlotStatus::Ready || binding.cook_secs == 0 {
            return false;
        }
        self.ctx.binding = Some(binding);
        self.transition(SlotStatus::InProgress);
        true
    }

    /// Clear the binding and return to `Ready` from any state.
    pub fn reset(&mut self) {
        if self.status() == SlotStatus::Ready {
            // Already idle; entry action would be a no-op anyway.
            self.ctx.clear();
            return;
        }
        self.transition(SlotStatus::Ready);
    }

    /// Advance by one scheduler tick.  Returns the new state if the slot
    /// transitioned.
    pub fn tick(&mut self) -> Option<SlotStatus> {
        let next = (self.table[self.current].on_tick)(&mut self.ctx)?;
        self.transition(next);
        Some(next)
    }

    /// Take the pending completion flag set when the slot entered `Done`.
    pub fn take_completion(&mut self) -> bool {
        core::mem::take(&mut self.ctx.completion_pending)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: SlotStatus) {
        let next_idx = next as usize;

        info!(
            "Slot {}: {} -> {}",
            self.ctx.slot, self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(&mut self.ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(&mut self.ctx);
        }
    }
}
