//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the timer bank, the menu catalog, the selection
//! coordinator and the press tracker.  It is the only mutation entry
//! point: the presentation layer sends [`AppCommand`]s, the scheduler
//! calls [`AppService::tick`], and everything observable leaves through
//! the [`EventSink`] port.
//!
//! ```text
//!  AppCommand ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                 │         AppService           │
//!   Scheduler ──▶ │  Bank · Catalog · Selection  │ ──▶ NotificationPort
//!                 └──────────────┬──────────────┘
//!                                ▼
//!                           StoragePort
//! ```

use log::{debug, info, warn};

use crate::bank::{SlotId, TickReport, TimerBank};
use crate::catalog::{MenuCatalog, MenuEntry, MenuId};
use crate::config::TimerConfig;
use crate::error::{Error, Result, ValidationError};
use crate::fsm::SlotStatus;
use crate::gesture::{PressOutcome, PressTracker};
use crate::selection::SelectionCoordinator;

use super::commands::AppCommand;
use super::events::{AppEvent, Snapshot};
use super::ports::{EventSink, NotificationPort, NotifyError, StorageError, StoragePort};

// ───────────────────────────────────────────────────────────────
// Catalog persistence
// ───────────────────────────────────────────────────────────────

/// Load the stored catalog, falling back to the built-in entries when
/// nothing usable is stored.  Never fails.
pub fn load_catalog(store: &impl StoragePort, config: &TimerConfig) -> MenuCatalog {
    let ns = &config.storage_namespace;
    let key = &config.catalog_key;
    if !store.exists(ns, key) {
        info!("Catalog: nothing stored at {}/{}, using defaults", ns, key);
        return MenuCatalog::with_defaults();
    }
    match store.read(ns, key) {
        Ok(blob) => match postcard::from_bytes::<Vec<MenuEntry>>(&blob) {
            Ok(entries) => {
                info!("Catalog: loaded {} entries from {}/{}", entries.len(), ns, key);
                MenuCatalog::from_entries(entries)
            }
            Err(e) => {
                warn!("Catalog: stored blob corrupted ({}), using defaults", e);
                MenuCatalog::with_defaults()
            }
        },
        Err(StorageError::NotFound) => {
            info!("Catalog: {}/{} vanished before read, using defaults", ns, key);
            MenuCatalog::with_defaults()
        }
        Err(e) => {
            warn!("Catalog: stored blob unreadable ({}), using defaults", e);
            MenuCatalog::with_defaults()
        }
    }
}

/// Persist the full ordered catalog.  The in-memory catalog stays
/// authoritative whatever happens here.
pub fn save_catalog(store: &mut impl StoragePort, config: &TimerConfig, catalog: &MenuCatalog) -> Result<()> {
    let blob = postcard::to_allocvec(catalog.entries())
        .map_err(|_| Error::Storage(StorageError::IoError))?;
    store.write(&config.storage_namespace, &config.catalog_key, &blob)?;
    debug!("Catalog: saved {} entries ({} bytes)", catalog.len(), blob.len());
    Ok(())
}

/// Notifier used when completion sounds are switched off.
struct Muted;

impl NotificationPort for Muted {
    fn notify_completion(&mut self, _slot: SlotId) -> core::result::Result<(), NotifyError> {
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    config: TimerConfig,
    bank: TimerBank,
    catalog: MenuCatalog,
    selection: SelectionCoordinator,
    press: PressTracker,
    tick_count: u64,
}

impl AppService {
    /// All slots `Ready`, nothing pending.
    pub fn new(config: TimerConfig, catalog: MenuCatalog) -> Self {
        let press = PressTracker::new(config.long_press_ms);
        Self {
            config,
            bank: TimerBank::new(),
            catalog,
            selection: SelectionCoordinator::new(),
            press,
            tick_count: 0,
        }
    }

    /// Construct with the catalog read from `store`.
    pub fn load(config: TimerConfig, store: &impl StoragePort) -> Self {
        let catalog = load_catalog(store, &config);
        Self::new(config, catalog)
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the initial state to the presentation layer.
    pub fn start(&self, sink: &mut impl EventSink) {
        info!(
            "AppService started: {} slots, {} menu entries",
            crate::bank::SLOT_COUNT,
            self.catalog.len()
        );
        sink.emit(&AppEvent::Started(self.snapshot()));
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One scheduler period: every running countdown loses one second.
    pub fn tick(&mut self, notifier: &mut impl NotificationPort, sink: &mut impl EventSink) -> TickReport {
        self.tick_count += 1;
        let report = if self.config.notify_on_done {
            self.bank.tick(notifier)
        } else {
            self.bank.tick(&mut Muted)
        };

        for &slot in &report.completed {
            sink.emit(&AppEvent::SlotChanged {
                slot,
                from: SlotStatus::InProgress,
                to: SlotStatus::Done,
            });
            sink.emit(&AppEvent::TimerCompleted(slot));
        }
        if report.changed() {
            self.emit_snapshot(sink);
        }
        report
    }

    /// Let a held press turn into an edit request without waiting for
    /// the release.  Call between ticks with the current time.
    pub fn poll_press(&mut self, now_ms: u32, sink: &mut impl EventSink) {
        if let Some(outcome) = self.press.poll(now_ms) {
            self.route_press(outcome, sink);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply one presentation-layer command.
    ///
    /// Only catalog validation failures come back as `Err`; they are
    /// also emitted as [`AppEvent::Rejected`].  Invalid transitions are
    /// silent no-ops.  Storage failures are logged and swallowed.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        store: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::RequestSelection(slot) => {
                if self.selection.request(slot, &self.bank) {
                    sink.emit(&AppEvent::SelectionPending(slot));
                    self.emit_snapshot(sink);
                }
            }
            AppCommand::CommitSelection(id) => self.commit_by_id(&id, sink),
            AppCommand::CancelSelection => {
                if self.selection.cancel().is_some() {
                    sink.emit(&AppEvent::SelectionCleared);
                    self.emit_snapshot(sink);
                }
            }
            AppCommand::Stop(slot) => {
                let from = self.bank.status(slot);
                self.bank.stop(slot);
                if from != SlotStatus::Ready {
                    sink.emit(&AppEvent::SlotChanged {
                        slot,
                        from,
                        to: SlotStatus::Ready,
                    });
                    self.emit_snapshot(sink);
                }
            }
            AppCommand::AddMenu { name, cook } => {
                let cook = cook.resolve().map_err(|e| reject(e, sink))?;
                self.catalog.add(&name, cook).map_err(|e| reject(e, sink))?;
                self.catalog_changed(store, sink);
            }
            AppCommand::EditMenu { id, name, cook } => {
                let cook = cook.resolve().map_err(|e| reject(e, sink))?;
                if self.catalog.edit(&id, &name, cook).map_err(|e| reject(e, sink))? {
                    self.catalog_changed(store, sink);
                }
            }
            AppCommand::DeleteMenu(id) => {
                if self.catalog.delete(&id) {
                    self.catalog_changed(store, sink);
                }
            }
            AppCommand::PressMenu { id, at_ms } => self.press.press(id, at_ms),
            AppCommand::ReleaseMenu { at_ms } => {
                if let Some(outcome) = self.press.release(at_ms) {
                    self.route_press(outcome, sink);
                }
            }
            AppCommand::SecondaryMenu(id) => {
                let outcome = self.press.secondary(id);
                self.route_press(outcome, sink);
            }
            AppCommand::CancelPress => self.press.cancel(),
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            slots: self.bank.views(),
            catalog: self.catalog.entries().to_vec(),
            selecting: self.selection.pending(),
        }
    }

    pub fn bank(&self) -> &TimerBank {
        &self.bank
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    pub fn pending_selection(&self) -> Option<SlotId> {
        self.selection.pending()
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Bind the entry's values as they are right now.  An id missing from
    /// the catalog leaves the pending selection in place.
    fn commit_by_id(&mut self, id: &MenuId, sink: &mut impl EventSink) {
        let Some(entry) = self.catalog.get(id).cloned() else {
            debug!("AppService: commit of unknown menu {} ignored", id);
            return;
        };
        let was_pending = self.selection.pending().is_some();
        if let Some(slot) = self.selection.commit(&entry, &mut self.bank) {
            sink.emit(&AppEvent::SlotChanged {
                slot,
                from: SlotStatus::Ready,
                to: SlotStatus::InProgress,
            });
        }
        if was_pending {
            sink.emit(&AppEvent::SelectionCleared);
            self.emit_snapshot(sink);
        }
    }

    fn route_press(&mut self, outcome: PressOutcome, sink: &mut impl EventSink) {
        match outcome {
            PressOutcome::Select(id) => self.commit_by_id(&id, sink),
            PressOutcome::Edit(id) => match self.catalog.get(&id) {
                Some(entry) => sink.emit(&AppEvent::EditRequested(entry.clone())),
                None => debug!("AppService: edit of unknown menu {} ignored", id),
            },
        }
    }

    fn catalog_changed(&mut self, store: &mut impl StoragePort, sink: &mut impl EventSink) {
        if let Err(e) = save_catalog(store, &self.config, &self.catalog) {
            warn!("Catalog: save failed, keeping in-memory copy: {}", e);
        }
        sink.emit(&AppEvent::CatalogChanged(self.catalog.len()));
        self.emit_snapshot(sink);
    }

    fn emit_snapshot(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Snapshot(self.snapshot()));
    }
}

fn reject(e: ValidationError, sink: &mut impl EventSink) -> Error {
    info!("Catalog: rejected: {}", e);
    sink.emit(&AppEvent::Rejected(e));
    Error::Validation(e)
}
