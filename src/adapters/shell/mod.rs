//! Application shell adapters.
//!
//! - `RecordingShell` - captures published sessions and start calls for
//!   test assertions
//! - `ConsoleShell` - logs session changes, for the demo binary

mod console;
mod recording;

pub use console::ConsoleShell;
pub use recording::RecordingShell;
