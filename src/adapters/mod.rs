//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to               |
//! |----------------|--------------------|---------------------------|
//! | `chime`        | NotificationPort   | Terminal bell (stdout)    |
//! | `file_store`   | StoragePort        | One file per key on disk  |
//! |                | ConfigPort         | `config.json`             |
//! | `log_sink`     | EventSink          | `log` facade              |
//! | `memory_store` | StoragePort        | In-process `HashMap`      |
//! |                | ConfigPort         |                           |

pub mod chime;
pub mod file_store;
pub mod log_sink;
pub mod memory_store;
