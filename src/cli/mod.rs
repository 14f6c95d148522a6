//! CLI commands
//!
//! Command implementations for the `chart-sync` binary.

mod progress;
mod style;
mod sync;

pub use sync::{run_sync, SyncArgs};
