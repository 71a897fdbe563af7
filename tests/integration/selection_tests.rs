//! Selection flow through the service: request, commit, cancel.

use fryertimer::adapters::memory_store::MemoryStore;
use fryertimer::{
    AppCommand, AppEvent, AppService, CookInput, MenuCatalog, MenuId, SlotId, SlotStatus, TimerConfig,
};

use super::mock_ports::{RecordingNotifier, RecordingSink};

fn sid(n: u8) -> SlotId {
    SlotId::new(n).unwrap()
}

fn mid(s: &str) -> MenuId {
    MenuId::new(s).unwrap()
}

fn service() -> (AppService, MemoryStore, RecordingSink) {
    (
        AppService::new(TimerConfig::default(), MenuCatalog::with_defaults()),
        MemoryStore::new(),
        RecordingSink::new(),
    )
}

#[test]
fn request_on_running_slot_is_ignored() {
    let (mut app, mut store, mut sink) = service();
    app.handle_command(AppCommand::RequestSelection(sid(1)), &mut store, &mut sink)
        .unwrap();
    app.handle_command(AppCommand::CommitSelection(mid("1")), &mut store, &mut sink)
        .unwrap();
    sink.clear();

    app.handle_command(AppCommand::RequestSelection(sid(1)), &mut store, &mut sink)
        .unwrap();
    assert_eq!(app.pending_selection(), None);
    assert!(sink.events.is_empty());
}

#[test]
fn request_on_done_slot_is_ignored_until_stopped() {
    let (mut app, mut store, mut sink) = service();
    app.handle_command(
        AppCommand::AddMenu {
            name: "Quick".into(),
            cook: CookInput::Secs(1),
        },
        &mut store,
        &mut sink,
    )
    .unwrap();
    let quick = app.catalog().entries().last().unwrap().id.clone();
    app.handle_command(AppCommand::RequestSelection(sid(6)), &mut store, &mut sink)
        .unwrap();
    app.handle_command(AppCommand::CommitSelection(quick), &mut store, &mut sink)
        .unwrap();
    app.tick(&mut RecordingNotifier::new(), &mut sink);
    assert_eq!(app.bank().status(sid(6)), SlotStatus::Done);

    app.handle_command(AppCommand::RequestSelection(sid(6)), &mut store, &mut sink)
        .unwrap();
    assert_eq!(app.pending_selection(), None);

    app.handle_command(AppCommand::Stop(sid(6)), &mut store, &mut sink)
        .unwrap();
    app.handle_command(AppCommand::RequestSelection(sid(6)), &mut store, &mut sink)
        .unwrap();
    assert_eq!(app.pending_selection(), Some(sid(6)));
}

#[test]
fn second_request_moves_pending_slot() {
    let (mut app, mut store, mut sink) = service();
    app.handle_command(AppCommand::RequestSelection(sid(2)), &mut store, &mut sink)
        .unwrap();
    app.handle_command(AppCommand::RequestSelection(sid(4)), &mut store, &mut sink)
        .unwrap();
    app.handle_command(AppCommand::CommitSelection(mid("3")), &mut store, &mut sink)
        .unwrap();

    assert_eq!(app.bank().status(sid(2)), SlotStatus::Ready);
    assert_eq!(app.bank().status(sid(4)), SlotStatus::InProgress);
    assert_eq!(app.bank().view(sid(4)).menu_name, "French Fries");
}

#[test]
fn cancel_then_commit_starts_nothing() {
    let (mut app, mut store, mut sink) = service();
    app.handle_command(AppCommand::RequestSelection(sid(3)), &mut store, &mut sink)
        .unwrap();
    app.handle_command(AppCommand::CancelSelection, &mut store, &mut sink)
        .unwrap();
    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::SelectionCleared)));

    app.handle_command(AppCommand::CommitSelection(mid("1")), &mut store, &mut sink)
        .unwrap();
    assert_eq!(app.bank().running_count(), 0);
}

#[test]
fn double_tap_commit_binds_once() {
    let (mut app, mut store, mut sink) = service();
    app.handle_command(AppCommand::RequestSelection(sid(5)), &mut store, &mut sink)
        .unwrap();
    app.handle_command(AppCommand::CommitSelection(mid("1")), &mut store, &mut sink)
        .unwrap();
    app.handle_command(AppCommand::CommitSelection(mid("2")), &mut store, &mut sink)
        .unwrap();

    let view = app.bank().view(sid(5));
    assert_eq!(view.menu_name, "Wings (First Cook)");
    assert_eq!(view.remaining_secs, 420);
    assert_eq!(app.bank().running_count(), 1);
}

#[test]
fn commit_emits_transition_and_snapshot() {
    let (mut app, mut store, mut sink) = service();
    app.handle_command(AppCommand::RequestSelection(sid(1)), &mut store, &mut sink)
        .unwrap();
    sink.clear();
    app.handle_command(AppCommand::CommitSelection(mid("2")), &mut store, &mut sink)
        .unwrap();

    assert!(matches!(
        sink.events[0],
        AppEvent::SlotChanged {
            from: SlotStatus::Ready,
            to: SlotStatus::InProgress,
            ..
        }
    ));
    let Some(AppEvent::Snapshot(snap)) = sink.events.last() else {
        panic!("expected trailing snapshot, got {:?}", sink.events);
    };
    assert_eq!(snap.selecting, None);
    assert_eq!(snap.slots[0].remaining_display, "06:00");
}
