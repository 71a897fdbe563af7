//! Mock port adapters for integration tests.
//!
//! Record every call so tests can assert on the full history without a
//! real speaker, screen or disk.

use std::cell::Cell;

use fryertimer::SlotId;
use fryertimer::app::events::AppEvent;
use fryertimer::app::ports::{EventSink, NotificationPort, NotifyError, StorageError, StoragePort};

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn completed(&self) -> Vec<SlotId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::TimerCompleted(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn snapshot_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Snapshot(_)))
            .count()
    }

    pub fn edit_requests(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::EditRequested(entry) => Some(entry.name.clone()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── RecordingNotifier ─────────────────────────────────────────

#[derive(Default)]
pub struct RecordingNotifier {
    pub calls: Vec<SlotId>,
    /// Every call fails after being recorded.
    pub fail: bool,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail: true,
        }
    }
}

impl NotificationPort for RecordingNotifier {
    fn notify_completion(&mut self, slot: SlotId) -> Result<(), NotifyError> {
        self.calls.push(slot);
        if self.fail {
            Err(NotifyError::Unavailable)
        } else {
            Ok(())
        }
    }
}

// ── FailingStore ──────────────────────────────────────────────

/// Store whose every read and write fails; counts attempts.
///
/// `present` makes `exists` report a blob that then cannot be read.
#[derive(Default)]
pub struct FailingStore {
    pub present: bool,
    pub read_attempts: Cell<u32>,
    pub write_attempts: u32,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn unreadable() -> Self {
        Self {
            present: true,
            ..Self::default()
        }
    }
}

impl StoragePort for FailingStore {
    fn read(&self, _namespace: &str, _key: &str) -> Result<Vec<u8>, StorageError> {
        self.read_attempts.set(self.read_attempts.get() + 1);
        Err(StorageError::IoError)
    }

    fn write(&mut self, _namespace: &str, _key: &str, _data: &[u8]) -> Result<(), StorageError> {
        self.write_attempts += 1;
        Err(StorageError::IoError)
    }

    fn exists(&self, _namespace: &str, _key: &str) -> bool {
        self.present
    }
}
