//! Catalog round-trips through the storage port.

use fryertimer::adapters::file_store::FileStore;
use fryertimer::adapters::memory_store::MemoryStore;
use fryertimer::app::ports::StoragePort;
use fryertimer::app::service::{load_catalog, save_catalog};
use fryertimer::{AppCommand, AppService, CookInput, MenuCatalog, TimerConfig};

use super::mock_ports::{FailingStore, RecordingSink};

fn add(app: &mut AppService, store: &mut impl StoragePort, name: &str, secs: u32) {
    app.handle_command(
        AppCommand::AddMenu {
            name: name.into(),
            cook: CookInput::Secs(secs),
        },
        store,
        &mut RecordingSink::new(),
    )
    .unwrap();
}

fn names(catalog: &MenuCatalog) -> Vec<String> {
    catalog.entries().iter().map(|e| e.name.clone()).collect()
}

#[test]
fn catalog_survives_restart_in_order() {
    let cfg = TimerConfig::default();
    let mut store = MemoryStore::new();

    let mut app = AppService::load(cfg.clone(), &store);
    add(&mut app, &mut store, "Tenders", 300);
    app.handle_command(
        AppCommand::DeleteMenu(app.catalog().entries()[1].id.clone()),
        &mut store,
        &mut RecordingSink::new(),
    )
    .unwrap();

    let restarted = AppService::load(cfg, &store);
    assert_eq!(
        names(restarted.catalog()),
        ["Wings (First Cook)", "French Fries", "Tenders"]
    );
}

#[test]
fn ids_after_restart_do_not_collide() {
    let cfg = TimerConfig::default();
    let mut store = MemoryStore::new();

    let mut app = AppService::load(cfg.clone(), &store);
    add(&mut app, &mut store, "Tenders", 300);

    let mut restarted = AppService::load(cfg, &store);
    add(&mut restarted, &mut store, "Onion Rings", 240);

    let ids: Vec<String> = restarted
        .catalog()
        .entries()
        .iter()
        .map(|e| e.id.to_string())
        .collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(ids.len(), unique.len(), "duplicate ids: {ids:?}");
}

#[test]
fn stored_empty_catalog_stays_empty() {
    let cfg = TimerConfig::default();
    let mut store = MemoryStore::new();
    save_catalog(&mut store, &cfg, &MenuCatalog::new()).unwrap();

    assert!(load_catalog(&store, &cfg).is_empty());
}

#[test]
fn failing_store_keeps_in_memory_catalog() {
    let mut store = FailingStore::default();
    let mut app = AppService::load(TimerConfig::default(), &store);
    assert_eq!(app.catalog().len(), 3);

    add(&mut app, &mut store, "Tenders", 300);
    assert_eq!(store.write_attempts, 1);
    assert_eq!(app.catalog().len(), 4);
}

#[test]
fn absent_blob_is_never_read() {
    let store = FailingStore::default();
    let catalog = load_catalog(&store, &TimerConfig::default());
    assert_eq!(store.read_attempts.get(), 0);
    assert_eq!(catalog.len(), 3);
}

#[test]
fn unreadable_blob_falls_back_to_defaults() {
    let store = FailingStore::unreadable();
    let catalog = load_catalog(&store, &TimerConfig::default());
    assert_eq!(store.read_attempts.get(), 1);
    assert_eq!(names(&catalog), ["Wings (First Cook)", "Boneless (First Cook)", "French Fries"]);
}

#[test]
fn custom_namespace_and_key_are_used() {
    let cfg = TimerConfig {
        storage_namespace: "line2".into(),
        catalog_key: "menus".into(),
        ..TimerConfig::default()
    };
    let mut store = MemoryStore::new();
    let mut app = AppService::new(cfg, MenuCatalog::new());
    add(&mut app, &mut store, "Tenders", 300);

    assert!(store.exists("line2", "menus"));
    assert!(!store.exists("kitchen", "kitchenTimer-menuList"));
}

#[test]
fn file_store_round_trip() {
    let dir = std::env::temp_dir().join(format!("fryertimer-it-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let cfg = TimerConfig::default();

    {
        let mut store = FileStore::open(&dir).unwrap();
        let mut app = AppService::load(cfg.clone(), &store);
        add(&mut app, &mut store, "Tenders", 300);
    }

    let store = FileStore::open(&dir).unwrap();
    let catalog = load_catalog(&store, &cfg);
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.entries()[3].cook_secs, 300);

    let _ = std::fs::remove_dir_all(&dir);
}
