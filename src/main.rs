//! FryerTimer: host entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                      │
//! │                                                               │
//! │   FileStore            LogEventSink          Chime            │
//! │   (Storage+Config)     (EventSink)           (Notification)   │
//! │                                                               │
//! │  ──────────────── Port Trait Boundary ───────────────────     │
//! │                                                               │
//! │  ┌─────────────────────────────────────────────────────────┐  │
//! │  │              AppService (pure logic)                    │  │
//! │  │  TimerBank · MenuCatalog · Selection · PressTracker     │  │
//! │  └─────────────────────────────────────────────────────────┘  │
//! │                                                               │
//! │  Scheduler (1 s tick task) · command pump (embassy channel)   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Runs a short scripted shift: starts a quick demo fry and a real
//! preset, lets the demo finish, acknowledges it, aborts the other, and
//! tidies the demo entry away again.  The catalog is read from disk but
//! the shift writes only to a scratch store, so the demo entry never
//! reaches the data directory.
#![deny(unused_must_use)]

use core::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use log::{info, warn};

use fryertimer::adapters::chime::Chime;
use fryertimer::adapters::file_store::FileStore;
use fryertimer::adapters::log_sink::LogEventSink;
use fryertimer::adapters::memory_store::MemoryStore;
use fryertimer::app::ports::{ConfigPort, EventSink, TickDelegate};
use fryertimer::scheduler::Scheduler;
use fryertimer::{AppCommand, AppEvent, AppService, CookInput, Error, MenuId, SlotId, TimerConfig};

type SharedApp = Rc<RefCell<AppService>>;
type CommandChannel = Channel<NoopRawMutex, AppCommand, 8>;

const DATA_DIR_ENV: &str = "FRYER_TIMER_DATA";
const DEFAULT_DATA_DIR: &str = "./fryer-data";
const DEMO_MENU: &str = "Demo Fry";
const DEMO_COOK_SECS: u32 = 3;
/// How often a held press is checked against the long-press threshold.
const PRESS_POLL: Duration = Duration::from_millis(50);

// ── Clock ─────────────────────────────────────────────────────

/// Milliseconds since the shift began; stamps press gestures.
#[derive(Debug, Clone, Copy)]
struct ShiftClock(Instant);

impl ShiftClock {
    fn start() -> Self {
        Self(Instant::now())
    }

    fn now_ms(self) -> u32 {
        u32::try_from(self.0.elapsed().as_millis()).unwrap_or(u32::MAX)
    }
}

/// Replace the script's placeholder press times with the real clock.
fn stamp(cmd: AppCommand, clock: ShiftClock) -> AppCommand {
    match cmd {
        AppCommand::PressMenu { id, .. } => AppCommand::PressMenu {
            id,
            at_ms: clock.now_ms(),
        },
        AppCommand::ReleaseMenu { .. } => AppCommand::ReleaseMenu {
            at_ms: clock.now_ms(),
        },
        other => other,
    }
}

// ── Tick delegate ─────────────────────────────────────────────
//
// Bridges the scheduler (which knows nothing about slots) to the
// service.  Runs on the same executor as the command pump, so a tick
// never overlaps a command.

struct ServiceTick {
    app: SharedApp,
    chime: Chime,
    sink: LogEventSink,
}

impl TickDelegate for ServiceTick {
    fn on_tick(&mut self) {
        self.app.borrow_mut().tick(&mut self.chime, &mut self.sink);
    }
}

// ── Tasks ─────────────────────────────────────────────────────

/// Drain presentation commands into the service, one at a time.
async fn command_pump(app: SharedApp, mut store: MemoryStore, clock: ShiftClock, channel: &CommandChannel) {
    let mut sink = LogEventSink::new();
    loop {
        let cmd = stamp(channel.receive().await, clock);
        if let Err(e) = app.borrow_mut().handle_command(cmd, &mut store, &mut sink) {
            warn!("Command refused: {}", e);
        }
    }
}

/// Turn a held press into an edit request once it crosses the threshold.
async fn press_poll(app: SharedApp, clock: ShiftClock, mut sink: impl EventSink) {
    loop {
        async_io_mini::Timer::after(PRESS_POLL).await;
        app.borrow_mut().poll_press(clock.now_ms(), &mut sink);
    }
}

/// Feed the scripted shift into the channel, pausing between steps.
async fn run_script(script: Vec<(Duration, AppCommand)>, channel: &CommandChannel) {
    for (delay, cmd) in script {
        if !delay.is_zero() {
            async_io_mini::Timer::after(delay).await;
        }
        channel.send(cmd).await;
    }
    // Let the pump drain the tail of the script.
    async_io_mini::Timer::after(Duration::from_millis(100)).await;
}

fn slot(n: u8) -> Result<SlotId> {
    SlotId::new(n).with_context(|| format!("slot {} out of range", n))
}

fn shift_script(demo: MenuId, preset: MenuId, tick: Duration) -> Result<Vec<(Duration, AppCommand)>> {
    let now = Duration::ZERO;
    let ms = Duration::from_millis;
    Ok(vec![
        (now, AppCommand::RequestSelection(slot(1)?)),
        (now, AppCommand::CommitSelection(demo.clone())),
        (ms(200), AppCommand::RequestSelection(slot(2)?)),
        // Tap: selects for slot 2.
        (now, AppCommand::PressMenu { id: preset.clone(), at_ms: 0 }),
        (ms(120), AppCommand::ReleaseMenu { at_ms: 0 }),
        (ms(200), AppCommand::SecondaryMenu(preset.clone())),
        // Hold: the poll task raises the edit before the release arrives.
        (ms(200), AppCommand::PressMenu { id: preset, at_ms: 0 }),
        (ms(1_000), AppCommand::ReleaseMenu { at_ms: 0 }),
        (tick * DEMO_COOK_SECS, AppCommand::Stop(slot(1)?)),
        (ms(200), AppCommand::Stop(slot(2)?)),
        (now, AppCommand::DeleteMenu(demo)),
    ])
}

fn load_config(store: &FileStore) -> TimerConfig {
    match store.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Config load failed ({}), using defaults", e);
            TimerConfig::default()
        }
    }
}

/// Service plus the scratch store its catalog edits land in.
struct Shift {
    app: AppService,
    scratch: MemoryStore,
    demo: MenuId,
    preset: MenuId,
}

/// Load the persisted catalog and add the demo entry to a scratch copy.
///
/// An empty catalog is valid: slot 2 then cooks the demo entry as well.
fn prepare_shift(disk: &FileStore, config: TimerConfig, sink: &mut impl EventSink) -> Result<Shift> {
    let mut scratch = MemoryStore::new();
    let mut app = AppService::load(config, disk);
    app.start(sink);

    let first = app.catalog().entries().first().map(|e| e.id.clone());
    app.handle_command(
        AppCommand::AddMenu {
            name: DEMO_MENU.to_string(),
            cook: CookInput::Secs(DEMO_COOK_SECS),
        },
        &mut scratch,
        sink,
    )?;
    let demo = app
        .catalog()
        .entries()
        .last()
        .map(|e| e.id.clone())
        .context("demo entry missing after add")?;
    let preset = first.unwrap_or_else(|| {
        info!("Catalog is empty; slot 2 will cook {} too", DEMO_MENU);
        demo.clone()
    });

    Ok(Shift {
        app,
        scratch,
        demo,
        preset,
    })
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  FryerTimer v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Storage + config ───────────────────────────────────
    let data_dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let disk = FileStore::open(&data_dir)
        .map_err(Error::from)
        .with_context(|| format!("opening data directory {}", data_dir))?;
    let config = load_config(&disk);

    // ── 3. Service ────────────────────────────────────────────
    let mut sink = LogEventSink::verbose();
    let Shift {
        app,
        scratch,
        demo,
        preset,
    } = prepare_shift(&disk, config.clone(), &mut sink)?;
    let app: SharedApp = Rc::new(RefCell::new(app));

    // ── 4. Executor, scheduler, command pump ──────────────────
    let tick = Duration::from_millis(u64::from(config.tick_interval_ms));
    let clock = ShiftClock::start();
    let channel = CommandChannel::new();
    let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();
    let mut sched = Scheduler::new(tick);

    sched.start(
        &executor,
        ServiceTick {
            app: app.clone(),
            chime: Chime::stdout(),
            sink: LogEventSink::new(),
        },
    );
    executor
        .spawn(command_pump(app.clone(), scratch, clock, &channel))
        .detach();
    executor
        .spawn(press_poll(app.clone(), clock, LogEventSink::new()))
        .detach();

    info!("System ready. Running scripted shift.");

    // ── 5. Shift ──────────────────────────────────────────────
    let script = shift_script(demo, preset, tick)?;
    futures_lite::future::block_on(executor.run(run_script(script, &channel)));

    // ── 6. Teardown ───────────────────────────────────────────
    sched.stop();
    let app = app.borrow();
    sink.emit(&AppEvent::Snapshot(app.snapshot()));
    info!(
        "Shift over after {} ticks; {} slots still running",
        app.tick_count(),
        app.bank().running_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fryertimer::MenuCatalog;
    use fryertimer::app::ports::StoragePort;
    use fryertimer::app::service::{load_catalog, save_catalog};

    struct Discard;

    impl EventSink for Discard {
        fn emit(&mut self, _event: &AppEvent) {}
    }

    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<AppEvent>>>);

    impl EventSink for Shared {
        fn emit(&mut self, event: &AppEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    fn scratch_dir(tag: &str) -> FileStore {
        let dir = std::env::temp_dir().join(format!("fryertimer-main-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        FileStore::open(dir).unwrap()
    }

    #[test]
    fn empty_catalog_still_runs_the_demo() {
        let cfg = TimerConfig::default();
        let mut disk = scratch_dir("empty");
        save_catalog(&mut disk, &cfg, &MenuCatalog::new()).unwrap();

        let shift = prepare_shift(&disk, cfg.clone(), &mut Discard).unwrap();
        assert_eq!(shift.preset, shift.demo);
        assert_eq!(shift.app.catalog().len(), 1);
        assert!(load_catalog(&disk, &cfg).is_empty());
        let _ = std::fs::remove_dir_all(disk.root());
    }

    #[test]
    fn demo_entry_never_reaches_disk() {
        let cfg = TimerConfig::default();
        let disk = scratch_dir("fresh");

        let shift = prepare_shift(&disk, cfg.clone(), &mut Discard).unwrap();
        assert_ne!(shift.preset, shift.demo);
        assert!(shift.scratch.exists(&cfg.storage_namespace, &cfg.catalog_key));
        assert!(!disk.exists(&cfg.storage_namespace, &cfg.catalog_key));
        let _ = std::fs::remove_dir_all(disk.root());
    }

    #[test]
    fn held_press_edits_before_release() {
        let app: SharedApp = Rc::new(RefCell::new(AppService::new(
            TimerConfig::default(),
            MenuCatalog::with_defaults(),
        )));
        let clock = ShiftClock::start();
        let events = Shared::default();
        let fries = MenuId::new("3").unwrap();
        let press = stamp(AppCommand::PressMenu { id: fries, at_ms: 0 }, clock);
        app.borrow_mut()
            .handle_command(press, &mut MemoryStore::new(), &mut Discard)
            .unwrap();

        let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();
        executor
            .spawn(press_poll(app.clone(), clock, events.clone()))
            .detach();
        futures_lite::future::block_on(executor.run(async_io_mini::Timer::after(Duration::from_millis(1_000))));

        let edits = events
            .0
            .borrow()
            .iter()
            .filter(|e| matches!(e, AppEvent::EditRequested(entry) if entry.name == "French Fries"))
            .count();
        assert_eq!(edits, 1);
    }

    #[test]
    fn stamp_only_touches_press_times() {
        let clock = ShiftClock::start();
        let AppCommand::ReleaseMenu { at_ms } = stamp(AppCommand::ReleaseMenu { at_ms: 99_999 }, clock) else {
            panic!("release changed kind");
        };
        assert!(at_ms < 99_999);
        assert!(matches!(
            stamp(AppCommand::CancelSelection, clock),
            AppCommand::CancelSelection
        ));
    }
}
