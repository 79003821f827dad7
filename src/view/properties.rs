//! Properties panel: a column of side tabs next to the selected page.
//!
//! Property editors are external collaborators; every page is a heading
//! and a placeholder line.

use crate::model::PanelName;
use crate::view::constants::SIDE_TAB_WIDTH;
use crate::view::panel::{Panel, PanelCommand, PanelContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListState, Paragraph},
    Frame,
};

/// Side tabs of the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertiesTab {
    /// General options
    Options,
    /// Camera settings
    Camera,
    /// Render settings
    Render,
}

impl PropertiesTab {
    /// Tabs in display order.
    pub const ALL: [PropertiesTab; 3] = [
        PropertiesTab::Options,
        PropertiesTab::Camera,
        PropertiesTab::Render,
    ];

    /// Side tab label.
    pub fn label(self) -> &'static str {
        match self {
            PropertiesTab::Options => "Options",
            PropertiesTab::Camera => "Camera",
            PropertiesTab::Render => "Render",
        }
    }

    /// Heading above the page.
    pub fn heading(self) -> &'static str {
        match self {
            PropertiesTab::Options => "Options",
            PropertiesTab::Camera => "Camera Settings",
            PropertiesTab::Render => "Render Settings",
        }
    }

    /// Text standing in for the page contents.
    pub fn placeholder(self) -> &'static str {
        match self {
            PropertiesTab::Options => "(options placeholder)",
            PropertiesTab::Camera => "(camera controls placeholder)",
            PropertiesTab::Render => "(render settings placeholder)",
        }
    }
}

/// Placeholder property editor with side tabs.
#[derive(Debug)]
pub struct PropertiesPanel {
    name: PanelName,
    selected: usize,
}

impl PropertiesPanel {
    /// Panel with the first tab selected.
    pub fn new() -> Self {
        Self {
            name: PanelName::from_static("properties"),
            selected: 0,
        }
    }

    /// Currently shown tab.
    pub fn selected_tab(&self) -> PropertiesTab {
        PropertiesTab::ALL[self.selected]
    }

    /// Selection stops at either end of the column.
    fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(PropertiesTab::ALL.len() - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

impl Default for PropertiesPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for PropertiesPanel {
    fn name(&self) -> &PanelName {
        &self.name
    }

    fn title(&self, _ctx: &PanelContext<'_>) -> String {
        "Properties".to_string()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext<'_>) {
        let [tabs_area, page_area] =
            Layout::horizontal([Constraint::Length(SIDE_TAB_WIDTH), Constraint::Min(0)])
                .areas(area);

        let items = PropertiesTab::ALL.iter().map(|tab| tab.label());
        let list = List::new(items)
            .block(Block::default().borders(Borders::RIGHT).border_style(ctx.styles.border))
            .highlight_style(ctx.styles.selection);
        let mut list_state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, tabs_area, &mut list_state);

        let tab = self.selected_tab();
        let separator = "─".repeat(usize::from(page_area.width.saturating_sub(1)));
        let page = Paragraph::new(vec![
            Line::from(format!(" {}", tab.heading())),
            Line::from(format!(" {}", separator)).style(ctx.styles.border),
            Line::from(format!(" {}", tab.placeholder())).style(ctx.styles.muted),
        ]);
        frame.render_widget(page, page_area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<PanelCommand> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn starts_on_options() {
        assert_eq!(PropertiesPanel::new().selected_tab(), PropertiesTab::Options);
    }

    #[test]
    fn up_and_down_move_selection_and_stop_at_ends() {
        let mut panel = PropertiesPanel::new();

        panel.handle_key(key(KeyCode::Up));
        assert_eq!(panel.selected_tab(), PropertiesTab::Options);

        panel.handle_key(key(KeyCode::Down));
        assert_eq!(panel.selected_tab(), PropertiesTab::Camera);

        panel.handle_key(key(KeyCode::Down));
        panel.handle_key(key(KeyCode::Down));
        assert_eq!(panel.selected_tab(), PropertiesTab::Render);
    }

    #[test]
    fn every_tab_has_distinct_placeholder() {
        let placeholders: Vec<&str> = PropertiesTab::ALL.iter().map(|t| t.placeholder()).collect();
        assert_eq!(
            placeholders,
            vec![
                "(options placeholder)",
                "(camera controls placeholder)",
                "(render settings placeholder)",
            ]
        );
    }
}
