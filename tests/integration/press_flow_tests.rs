//! Press gestures on catalog entries routed through the service.

use fryertimer::adapters::memory_store::MemoryStore;
use fryertimer::{AppCommand, AppService, MenuCatalog, MenuId, SlotId, SlotStatus, TimerConfig};

use super::mock_ports::RecordingSink;

fn sid(n: u8) -> SlotId {
    SlotId::new(n).unwrap()
}

fn mid(s: &str) -> MenuId {
    MenuId::new(s).unwrap()
}

fn press(app: &mut AppService, store: &mut MemoryStore, sink: &mut RecordingSink, id: &str, at_ms: u32) {
    app.handle_command(AppCommand::PressMenu { id: mid(id), at_ms }, store, sink)
        .unwrap();
}

fn release(app: &mut AppService, store: &mut MemoryStore, sink: &mut RecordingSink, at_ms: u32) {
    app.handle_command(AppCommand::ReleaseMenu { at_ms }, store, sink)
        .unwrap();
}

#[test]
fn tap_selects_for_pending_slot() {
    let mut app = AppService::new(TimerConfig::default(), MenuCatalog::with_defaults());
    let (mut store, mut sink) = (MemoryStore::new(), RecordingSink::new());

    app.handle_command(AppCommand::RequestSelection(sid(2)), &mut store, &mut sink)
        .unwrap();
    press(&mut app, &mut store, &mut sink, "1", 10_000);
    release(&mut app, &mut store, &mut sink, 10_150);

    assert_eq!(app.bank().status(sid(2)), SlotStatus::InProgress);
    assert_eq!(app.bank().view(sid(2)).remaining_secs, 420);
    assert!(sink.edit_requests().is_empty());
}

#[test]
fn tap_without_pending_slot_does_nothing() {
    let mut app = AppService::new(TimerConfig::default(), MenuCatalog::with_defaults());
    let (mut store, mut sink) = (MemoryStore::new(), RecordingSink::new());

    press(&mut app, &mut store, &mut sink, "1", 0);
    release(&mut app, &mut store, &mut sink, 100);

    assert_eq!(app.bank().running_count(), 0);
    assert!(sink.events.is_empty());
}

#[test]
fn held_press_edits_and_never_selects() {
    let mut app = AppService::new(TimerConfig::default(), MenuCatalog::with_defaults());
    let (mut store, mut sink) = (MemoryStore::new(), RecordingSink::new());

    app.handle_command(AppCommand::RequestSelection(sid(1)), &mut store, &mut sink)
        .unwrap();
    press(&mut app, &mut store, &mut sink, "2", 0);
    app.poll_press(500, &mut sink);
    assert!(sink.edit_requests().is_empty());
    app.poll_press(800, &mut sink);
    assert_eq!(sink.edit_requests(), ["Boneless (First Cook)"]);

    release(&mut app, &mut store, &mut sink, 1_200);
    assert_eq!(app.bank().status(sid(1)), SlotStatus::Ready);
    assert_eq!(sink.edit_requests().len(), 1);
}

#[test]
fn secondary_click_edits() {
    let mut app = AppService::new(TimerConfig::default(), MenuCatalog::with_defaults());
    let (mut store, mut sink) = (MemoryStore::new(), RecordingSink::new());

    app.handle_command(AppCommand::SecondaryMenu(mid("3")), &mut store, &mut sink)
        .unwrap();
    assert_eq!(sink.edit_requests(), ["French Fries"]);
}

#[test]
fn configured_threshold_is_honoured() {
    let cfg = TimerConfig {
        long_press_ms: 300,
        ..TimerConfig::default()
    };
    let mut app = AppService::new(cfg, MenuCatalog::with_defaults());
    let (mut store, mut sink) = (MemoryStore::new(), RecordingSink::new());

    app.handle_command(AppCommand::RequestSelection(sid(4)), &mut store, &mut sink)
        .unwrap();
    press(&mut app, &mut store, &mut sink, "3", 0);
    release(&mut app, &mut store, &mut sink, 400);

    assert_eq!(sink.edit_requests(), ["French Fries"]);
    assert_eq!(app.bank().status(sid(4)), SlotStatus::Ready);
}

#[test]
fn cancelled_press_does_nothing() {
    let mut app = AppService::new(TimerConfig::default(), MenuCatalog::with_defaults());
    let (mut store, mut sink) = (MemoryStore::new(), RecordingSink::new());

    app.handle_command(AppCommand::RequestSelection(sid(4)), &mut store, &mut sink)
        .unwrap();
    sink.clear();
    press(&mut app, &mut store, &mut sink, "3", 0);
    app.handle_command(AppCommand::CancelPress, &mut store, &mut sink)
        .unwrap();
    release(&mut app, &mut store, &mut sink, 100);

    assert!(sink.events.is_empty());
    assert_eq!(app.pending_selection(), Some(sid(4)));
}
