//! FryerTimer library.
//!
//! Six independent fryer countdowns, each bound at start time to a copy
//! of a menu preset, plus the editable menu catalog they draw from.
//! The binary in `main.rs` wires these modules to a file store, the
//! terminal bell and the logger; everything here is host-agnostic.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod bank;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fsm;
pub mod gesture;
pub mod scheduler;
pub mod selection;

pub use app::commands::{AppCommand, CookInput};
pub use app::events::{AppEvent, Snapshot};
pub use app::service::AppService;
pub use bank::{SLOT_COUNT, SlotId, TimerBank};
pub use catalog::{CookTime, MenuCatalog, MenuEntry, MenuId};
pub use config::TimerConfig;
pub use error::{Error, Result, ValidationError};
pub use fsm::SlotStatus;
