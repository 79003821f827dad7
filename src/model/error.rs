//! Error types for the dockshell application.
//!
//! Errors follow a small taxonomy that decides how each failure is handled:
//!
//! - **Fatal startup**: the terminal cannot be put into UI mode
//!   ([`crate::view::TuiError`]). The process exits with status 1 and no UI.
//! - **Configuration**: the config file or the layout description is invalid
//!   ([`crate::config::ConfigError`], [`crate::dock::LayoutError`]). Reported
//!   and startup is aborted, since a broken static layout cannot be patched
//!   while running.
//! - **Degraded**: the diagnostic channel cannot be intercepted
//!   ([`crate::console::CaptureError`]). Logged; the console panel stays empty
//!   and the application continues.
//!
//! Nothing here is retried: none of these operations is transient.

use crate::config::ConfigError;
use crate::dock::LayoutError;
use crate::logging::LoggingError;
use crate::view::TuiError;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// Degraded-mode conditions never reach this type; they are absorbed where
/// they happen.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Layout description is malformed.
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Terminal setup, rendering, or teardown failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

impl AppError {
    /// Whether this error belongs to the configuration class.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::Config(_) | AppError::Layout(_))
    }
}
