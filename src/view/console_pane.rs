//! Console panel: captured output, oldest line first.

use crate::model::PanelName;
use crate::state::LogLine;
use crate::view::panel::{Panel, PanelCommand, PanelContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use std::collections::VecDeque;

/// Hint row above the log lines.
pub const CLEAR_HINT: &str = "[Clear] c / Ctrl+L";

// ===== ConsoleView Widget =====

/// Window of console lines starting at `top`.
pub struct ConsoleView<'a> {
    lines: &'a VecDeque<LogLine>,
    top: usize,
    style: Style,
}

impl<'a> ConsoleView<'a> {
    /// Show `lines` from index `top` on.
    pub fn new(lines: &'a VecDeque<LogLine>, top: usize) -> Self {
        Self {
            lines,
            top,
            style: Style::default(),
        }
    }

    /// Text style of every line.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for ConsoleView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible: Vec<Line> = self
            .lines
            .iter()
            .skip(self.top)
            .take(usize::from(area.height))
            .map(|line| Line::from(line.as_str()))
            .collect();
        Paragraph::new(visible).style(self.style).render(area, buf);
    }
}

/// First line index that shows the newest line at the bottom of `height` rows.
pub fn bottom_top(total: usize, height: usize) -> usize {
    total.saturating_sub(height)
}

// ===== ConsolePanel =====

/// Scroll position requested by the user, resolved against the line count
/// when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollRequest {
    None,
    Lines(isize),
    Pages(isize),
    Top,
    Bottom,
}

/// Docked panel showing the console line store.
#[derive(Debug)]
pub struct ConsolePanel {
    name: PanelName,
    /// Index of the first visible line
    top: usize,
    /// Rows available for lines at the last draw
    page: usize,
    pending_scroll: ScrollRequest,
}

impl ConsolePanel {
    /// Panel scrolled to the top.
    pub fn new() -> Self {
        Self {
            name: PanelName::from_static("console"),
            top: 0,
            page: 1,
            pending_scroll: ScrollRequest::None,
        }
    }

    /// Index of the first visible line after the last draw.
    pub fn top(&self) -> usize {
        self.top
    }

    fn resolve_scroll(&mut self, total: usize, auto_scroll: bool) {
        let max_top = bottom_top(total, self.page);
        let request = std::mem::replace(&mut self.pending_scroll, ScrollRequest::None);

        let top = if auto_scroll {
            max_top
        } else {
            match request {
                ScrollRequest::None => self.top,
                ScrollRequest::Lines(delta) => self.top.saturating_add_signed(delta),
                ScrollRequest::Pages(delta) => {
                    let page = self.page.max(1) as isize;
                    self.top.saturating_add_signed(delta.saturating_mul(page))
                }
                ScrollRequest::Top => 0,
                ScrollRequest::Bottom => max_top,
            }
        };
        self.top = top.min(max_top);
    }
}

impl Default for ConsolePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ConsolePanel {
    fn name(&self) -> &PanelName {
        &self.name
    }

    fn title(&self, ctx: &PanelContext<'_>) -> String {
        match ctx.console.len() {
            1 => "Console (1 line)".to_string(),
            n => format!("Console ({} lines)", n),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext<'_>) {
        let [hint_area, log_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(CLEAR_HINT, ctx.styles.muted))),
            hint_area,
        );

        self.page = usize::from(log_area.height);
        self.resolve_scroll(ctx.console.len(), ctx.scroll_to_latest);

        frame.render_widget(ConsoleView::new(ctx.console.lines(), self.top), log_area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<PanelCommand> {
        self.pending_scroll = match key.code {
            KeyCode::Char('c') => return Some(PanelCommand::ClearConsole),
            KeyCode::Up | KeyCode::Char('k') => ScrollRequest::Lines(-1),
            KeyCode::Down | KeyCode::Char('j') => ScrollRequest::Lines(1),
            KeyCode::PageUp => ScrollRequest::Pages(-1),
            KeyCode::PageDown => ScrollRequest::Pages(1),
            KeyCode::Home | KeyCode::Char('g') => ScrollRequest::Top,
            KeyCode::End | KeyCode::Char('G') => ScrollRequest::Bottom,
            _ => return None,
        };
        None
    }
}
