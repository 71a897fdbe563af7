//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no sound
//! device or data directory required.

mod mock_ports;
mod persistence_tests;
mod press_flow_tests;
mod selection_tests;
