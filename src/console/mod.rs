//! Output capture console.
//!
//! Pairs the optional stream interception with the line store it feeds.
//! A console whose interception could not be installed keeps working in a
//! degraded mode: it only shows lines the shell logs directly.

mod capture;

pub use capture::{CaptureError, CaptureStream, OutputCapture};

use crate::config::ConsoleSettings;
use crate::state::ConsoleState;
use tracing::{info, warn};

/// The console: interception handle plus line store.
#[derive(Debug)]
pub struct Console {
    state: ConsoleState,
    capture: Option<OutputCapture>,
}

impl Console {
    /// Install interception as configured.
    ///
    /// Never fails: if the stream cannot be intercepted the console runs
    /// without capture and the reason is logged.
    pub fn install(settings: &ConsoleSettings) -> Self {
        if !settings.capture {
            info!("Output capture disabled by configuration");
            return Self::disabled(settings.max_lines);
        }

        match OutputCapture::install(settings.stream, settings.tee) {
            Ok(capture) => {
                info!(stream = %settings.stream, tee = settings.tee, "Capturing output into console");
                Self::with_capture(capture, settings.max_lines)
            }
            Err(err) => {
                warn!(error = %err, "Output capture unavailable; console will stay empty");
                Self::disabled(settings.max_lines)
            }
        }
    }

    /// A console without interception.
    pub fn disabled(max_lines: usize) -> Self {
        Self {
            state: ConsoleState::new(max_lines),
            capture: None,
        }
    }

    /// A console fed by an already installed interception.
    pub fn with_capture(capture: OutputCapture, max_lines: usize) -> Self {
        Self {
            state: ConsoleState::new(max_lines),
            capture: Some(capture),
        }
    }

    /// Move captured output into the line store.
    ///
    /// Called once per frame. Never blocks; cost is proportional to the bytes
    /// written since the previous drain.
    ///
    /// # Returns
    /// The number of lines appended.
    pub fn drain(&mut self) -> usize {
        let Some(capture) = self.capture.as_mut() else {
            return 0;
        };
        let mut bytes = Vec::new();
        if capture.read_available(&mut bytes) == 0 {
            return 0;
        }
        self.state.ingest(&bytes)
    }

    /// Stop intercepting and restore the original destination.
    ///
    /// Output written before this call is drained into the store first,
    /// including a final unterminated fragment. Output written afterwards
    /// goes to the original destination only. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Os` if the stream cannot be restored.
    pub fn uninstall(&mut self) -> Result<(), CaptureError> {
        if self.capture.is_none() {
            return Ok(());
        }
        self.drain();
        self.state.finish_pending();
        match self.capture.take() {
            Some(capture) => capture.uninstall(),
            None => Ok(()),
        }
    }

    /// Empty the line store. Interception is unaffected.
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Append a line written by the shell itself.
    pub fn log(&mut self, text: &str) {
        self.state.log(text);
    }

    /// Whether the stream is currently intercepted.
    pub fn is_capturing(&self) -> bool {
        self.capture
            .as_ref()
            .is_some_and(OutputCapture::is_installed)
    }

    /// The intercepted stream, if capture is active.
    pub fn stream(&self) -> Option<CaptureStream> {
        self.capture.as_ref().map(OutputCapture::stream)
    }

    /// The line store.
    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    /// Mutable access to the line store, for the frame driver.
    pub fn state_mut(&mut self) -> &mut ConsoleState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_console_drains_nothing() {
        let mut console = Console::disabled(100);

        assert_eq!(console.drain(), 0);
        assert!(!console.is_capturing());
        assert_eq!(console.stream(), None);
        assert!(console.state().is_empty());
    }

    #[test]
    fn install_with_capture_off_is_disabled() {
        let settings = ConsoleSettings {
            capture: false,
            ..ConsoleSettings::default()
        };

        let console = Console::install(&settings);

        assert!(!console.is_capturing());
    }

    #[test]
    fn log_reaches_store_without_capture() {
        let mut console = Console::disabled(100);

        console.log("Application started");

        assert_eq!(console.state().len(), 1);
        assert!(console.state().scroll_requested());
    }

    #[test]
    fn clear_empties_store() {
        let mut console = Console::disabled(100);
        console.log("one");
        console.log("two");

        console.clear();
        console.drain();

        assert!(console.state().is_empty());
    }

    #[test]
    fn uninstall_without_capture_is_ok() {
        let mut console = Console::disabled(100);

        assert!(console.uninstall().is_ok());
        assert!(console.uninstall().is_ok());
    }

    #[test]
    fn max_lines_is_applied_to_store() {
        let console = Console::disabled(7);

        assert_eq!(console.state().capacity(), 7);
    }
}
