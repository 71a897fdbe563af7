//! Application core: domain orchestration, zero I/O.
//!
//! Wires the timer bank, the menu catalog and the selection coordinator
//! behind one service.  All interaction with storage, sound and screens
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real devices.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
