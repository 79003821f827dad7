//! UI state (pure).
//!
//! All state transitions are plain functions testable without a terminal.

pub mod console;
pub mod menu;

pub use console::{ConsoleState, LogLine, MAX_LINE_BYTES};
pub use menu::MenuState;
