//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via `env_logger` in the host binary).  A
//! screen renderer would implement the same trait.

use log::{info, warn};

use crate::app::events::{AppEvent, Snapshot};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as one line.
#[derive(Debug, Default)]
pub struct LogEventSink {
    /// Log full snapshots as JSON; otherwise only a one-line summary.
    verbose: bool,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }

    fn snapshot(&self, tag: &str, snap: &Snapshot) {
        if self.verbose {
            match serde_json::to_string(snap) {
                Ok(json) => info!("{} | {}", tag, json),
                Err(e) => warn!("{} | snapshot not serialisable: {}", tag, e),
            }
        } else {
            info!("{} | {}", tag, summary(snap));
        }
    }
}

/// `1:Ready 2:InProgress(06:59) ... | menu=3 | selecting=-`
fn summary(snap: &Snapshot) -> String {
    let mut line = String::new();
    for v in &snap.slots {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&format!("{}:{}", v.slot, v.status));
        if v.remaining_secs > 0 {
            line.push_str(&format!("({})", v.remaining_display));
        }
    }
    let selecting = snap
        .selecting
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    format!("{} | menu={} | selecting={}", line, snap.catalog.len(), selecting)
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(snap) => self.snapshot("START", snap),
            AppEvent::SlotChanged { slot, from, to } => {
                info!("SLOT  | {} {} -> {}", slot, from, to);
            }
            AppEvent::TimerCompleted(slot) => info!("DONE  | slot {}", slot),
            AppEvent::SelectionPending(slot) => info!("SELECT| slot {} awaiting menu", slot),
            AppEvent::SelectionCleared => info!("SELECT| cleared"),
            AppEvent::CatalogChanged(len) => info!("MENU  | {} entries", len),
            AppEvent::EditRequested(entry) => {
                info!(
                    "EDIT  | {} '{}' {}",
                    entry.id,
                    entry.name,
                    entry.cook_time()
                );
            }
            AppEvent::Rejected(reason) => warn!("REJECT| {}", reason),
            AppEvent::Snapshot(snap) => self.snapshot("SNAP ", snap),
        }
    }
}
