//! Fuzz target: stored catalog blob
//!
//! Writes arbitrary bytes under the catalog key and loads the service
//! from it.  Verifies:
//! - No panics on corrupted or truncated blobs
//! - The loaded catalog never holds a blank name, a zero cook time, or a
//!   duplicate id
//! - A fresh `add` never reuses an existing id
//!
//! cargo fuzz run fuzz_catalog_decode

#![no_main]

use std::collections::HashSet;

use fryertimer::adapters::memory_store::MemoryStore;
use fryertimer::app::ports::StoragePort;
use fryertimer::{AppService, CookTime, TimerConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let cfg = TimerConfig::default();
    let mut store = MemoryStore::new();
    store
        .write(&cfg.storage_namespace, &cfg.catalog_key, data)
        .expect("memory store write");

    let app = AppService::load(cfg, &store);
    let mut catalog = app.catalog().clone();

    let mut ids = HashSet::new();
    for e in catalog.entries() {
        assert!(!e.name.trim().is_empty());
        assert!(e.cook_secs > 0);
        assert!(ids.insert(e.id.clone()), "duplicate id {}", e.id);
    }

    let fresh = catalog
        .add("Fuzz", CookTime::from_secs(1).expect("one second"))
        .expect("valid add");
    assert!(!ids.contains(&fresh), "add reused id {fresh}");
});
