//! Concrete slot state handlers and the shared state table.
//!
//! ```text
//!  READY ──[menu chosen]──▶ IN_PROGRESS ──[remaining hits 0]──▶ DONE
//!    ▲                           │                                │
//!    └─────────[stop]────────────┴─────────────[stop]─────────────┘
//!
//!  SET: bound but not counting. Reserved; nothing enters it today.
//! ```

use super::context::SlotContext;
use super::{SlotStatus, StateDescriptor};
use log::debug;

/// The table every slot points at.  Indexed by `SlotStatus as usize`.
pub static STATE_TABLE: [StateDescriptor; SlotStatus::COUNT] = [
    // Index 0: Ready
    StateDescriptor {
        id: SlotStatus::Ready,
        name: "Ready",
        on_enter: Some(ready_enter),
        on_exit: None,
        on_tick: idle_tick,
    },
    // Index 1: Set
    StateDescriptor {
        id: SlotStatus::Set,
        name: "Set",
        on_enter: None,
        on_exit: None,
        on_tick: idle_tick,
    },
    // Index 2: InProgress
    StateDescriptor {
        id: SlotStatus::InProgress,
        name: "InProgress",
        on_enter: Some(in_progress_enter),
        on_exit: None,
        on_tick: in_progress_tick,
    },
    // Index 3: Done
    StateDescriptor {
        id: SlotStatus::Done,
        name: "Done",
        on_enter: Some(done_enter),
        on_exit: None,
        on_tick: idle_tick,
    },
];

// ═══════════════════════════════════════════════════════════════════════════
//  READY / SET / DONE: nothing counts
// ═══════════════════════════════════════════════════════════════════════════

fn ready_enter(ctx: &mut SlotContext) {
    ctx.clear();
}

fn idle_tick(_ctx: &mut SlotContext) -> Option<SlotStatus> {
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  IN_PROGRESS: one second off per tick
// ═══════════════════════════════════════════════════════════════════════════

fn in_progress_enter(ctx: &mut SlotContext) {
    ctx.remaining_secs = ctx.bound_cook_secs();
    ctx.completion_pending = false;
}

fn in_progress_tick(ctx: &mut SlotContext) -> Option<SlotStatus> {
    if ctx.remaining_secs == 0 {
        // Only reachable if a zero-length binding slipped through; leave it.
        return None;
    }

    ctx.remaining_secs -= 1;
    debug!("Slot {}: {}s left", ctx.slot, ctx.remaining_secs);

    if ctx.remaining_secs == 0 {
        return Some(SlotStatus::Done);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  DONE: countdown finished, waiting for the cook to acknowledge
// ═══════════════════════════════════════════════════════════════════════════

fn done_enter(ctx: &mut SlotContext) {
    ctx.remaining_secs = 0;
    ctx.completion_pending = true;
}
