//! Dock Shell (dockshell)
//!
//! Terminal application shell: a menu strip and a fixed set of docked
//! panels laid out once from a declarative description, plus a console
//! panel that shows the process's own diagnostic output.
//!
//! Follows a Pure Core / Impure Shell split: `model`, `state` and `dock`
//! are plain data and transitions; `console`, `source` and `view` touch the
//! process and the terminal.

/// Configuration loading and precedence.
pub mod config;
/// Output capture and the console it feeds.
pub mod console;
/// Layout description and region tree.
pub mod dock;
/// File-based tracing setup.
pub mod logging;
/// Identifiers, actions and errors.
pub mod model;
/// Input event sources.
pub mod source;
/// Plain state: console lines, menu.
pub mod state;
/// Panels and the frame driver.
pub mod view;
