//! Console line store fed by the captured diagnostic channel.
//!
//! Bytes arrive in arbitrary chunks; only completed lines are stored.
//! A trailing fragment without a terminator is held back until a later
//! chunk completes it.

use std::collections::VecDeque;

/// Longest line kept in one piece. A longer unterminated run is stored as
/// consecutive lines of this many bytes, so the held-back fragment stays
/// bounded.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;

/// A single completed line of captured text. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine(String);

impl LogLine {
    /// The line text, without its terminator.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// State behind the console panel.
///
/// Lines are kept oldest at front, newest at back. When `capacity` is
/// non-zero the oldest lines are discarded once it is exceeded.
#[derive(Debug)]
pub struct ConsoleState {
    lines: VecDeque<LogLine>,
    /// Maximum lines to retain (0 = unbounded)
    capacity: usize,
    /// Bytes of the current, not yet terminated line. Never contains `\n`
    /// and is always shorter than `MAX_LINE_BYTES`.
    pending: Vec<u8>,
    /// Set on every append, consumed by the render step
    scroll_to_latest: bool,
}

impl ConsoleState {
    /// Create an empty store retaining at most `capacity` lines (0 = unbounded).
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
            pending: Vec::new(),
            scroll_to_latest: false,
        }
    }

    /// Feed raw captured bytes and append every line they complete.
    ///
    /// Lines are split on `\n`; a trailing `\r` is dropped and empty lines are
    /// skipped. Runs of `MAX_LINE_BYTES` without a terminator are cut into
    /// their own line. Work is proportional to `bytes.len()`.
    ///
    /// # Returns
    /// The number of lines appended.
    pub fn ingest(&mut self, bytes: &[u8]) -> usize {
        if bytes.is_empty() {
            return 0;
        }

        let Self {
            lines,
            capacity,
            pending,
            scroll_to_latest,
        } = self;

        // `pending` holds no terminator, so only the new bytes need scanning
        let scan_from = pending.len();
        pending.extend_from_slice(bytes);

        let mut appended = 0;
        let mut line_start = 0;
        let mut cursor = scan_from;
        loop {
            let limit = pending.len().min(line_start + MAX_LINE_BYTES);
            let line = match pending[cursor..limit].iter().position(|&b| b == b'\n') {
                Some(offset) => {
                    let line_end = cursor + offset;
                    let mut line = &pending[line_start..line_end];
                    if let Some((&b'\r', rest)) = line.split_last() {
                        line = rest;
                    }
                    line_start = line_end + 1;
                    line
                }
                // No terminator within the limit: cut the line here
                None if limit - line_start == MAX_LINE_BYTES => {
                    let line = &pending[line_start..limit];
                    line_start = limit;
                    line
                }
                None => break,
            };
            if !line.is_empty() {
                push_bounded(
                    lines,
                    *capacity,
                    LogLine(String::from_utf8_lossy(line).into_owned()),
                );
                appended += 1;
            }
            cursor = line_start;
        }
        pending.drain(..line_start);

        if appended > 0 {
            *scroll_to_latest = true;
        }
        appended
    }

    /// Append text written by the shell itself.
    ///
    /// Behaves like captured output that ends with a terminator: each
    /// non-empty `\n`-separated segment becomes one line.
    pub fn log(&mut self, text: &str) {
        let mut appended = false;
        for segment in text.split('\n') {
            let segment = segment.strip_suffix('\r').unwrap_or(segment);
            if !segment.is_empty() {
                push_bounded(&mut self.lines, self.capacity, LogLine(segment.to_string()));
                appended = true;
            }
        }
        if appended {
            self.scroll_to_latest = true;
        }
    }

    /// Store the held-back fragment as a final line, if there is one.
    ///
    /// Used when capture stops and no terminator will ever arrive.
    pub fn finish_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut tail = std::mem::take(&mut self.pending);
        if tail.last() == Some(&b'\r') {
            tail.pop();
        }
        if !tail.is_empty() {
            push_bounded(
                &mut self.lines,
                self.capacity,
                LogLine(String::from_utf8_lossy(&tail).into_owned()),
            );
            self.scroll_to_latest = true;
        }
    }

    /// Remove all stored lines. The held-back fragment is kept.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll_to_latest = false;
    }

    /// Consume the scroll-to-latest request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_latest)
    }

    /// Whether new lines arrived since the last render.
    pub fn scroll_requested(&self) -> bool {
        self.scroll_to_latest
    }

    /// All stored lines (oldest to newest).
    pub fn lines(&self) -> &VecDeque<LogLine> {
        &self.lines
    }

    /// Number of stored lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines are stored.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of bytes waiting for a line terminator.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Retention cap (0 = unbounded).
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn push_bounded(lines: &mut VecDeque<LogLine>, capacity: usize, line: LogLine) {
    if capacity > 0 && lines.len() >= capacity {
        lines.pop_front();
    }
    lines.push_back(line);
}
