//! Input event sources for the frame loop.
//!
//! Polling is always non-blocking: a frame takes whatever events are
//! already waiting and moves on.

use crossterm::event::{self, Event};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Upper bound on events taken in one frame, so a flood of input cannot
/// starve the rest of the frame.
const MAX_EVENTS_PER_FRAME: usize = 256;

/// Where the frame loop gets its input events from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum EventSource {
    /// The real terminal, read through crossterm
    Terminal,
    /// A queue filled by the caller (tests, headless runs)
    Scripted(VecDeque<Event>),
}

impl EventSource {
    /// A scripted source pre-loaded with `events`.
    pub fn scripted(events: impl IntoIterator<Item = Event>) -> Self {
        Self::Scripted(events.into_iter().collect())
    }

    /// Queue an event on a scripted source. Ignored for the terminal.
    pub fn push(&mut self, event: Event) {
        if let Self::Scripted(queue) = self {
            queue.push_back(event);
        }
    }

    /// Take every event that is ready now.
    ///
    /// # Errors
    ///
    /// Returns the terminal's I/O error if reading events fails.
    pub fn poll(&mut self) -> io::Result<Vec<Event>> {
        match self {
            Self::Terminal => {
                let mut events = Vec::new();
                while events.len() < MAX_EVENTS_PER_FRAME && event::poll(Duration::ZERO)? {
                    events.push(event::read()?);
                }
                Ok(events)
            }
            Self::Scripted(queue) => {
                let take = queue.len().min(MAX_EVENTS_PER_FRAME);
                Ok(queue.drain(..take).collect())
            }
        }
    }
}
