//! Central viewport panel.
//!
//! Rendering and simulation views are external collaborators; each tab
//! only reserves its space with a placeholder line.

use crate::model::PanelName;
use crate::view::constants::VIEWPORT_TAB_HEIGHT;
use crate::view::panel::{Panel, PanelCommand, PanelContext};
use crate::view::tabs::render_tab_bar;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

/// Tabs of the viewport, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportTab {
    /// Rendered scene
    Render,
    /// Solar radiation analysis
    SolarRadiation,
    /// Baking
    Bake,
    /// LIDAR
    Lidar,
}

impl ViewportTab {
    /// Tabs in display order.
    pub const ALL: [ViewportTab; 4] = [
        ViewportTab::Render,
        ViewportTab::SolarRadiation,
        ViewportTab::Bake,
        ViewportTab::Lidar,
    ];

    /// Tab title.
    pub fn label(self) -> &'static str {
        match self {
            ViewportTab::Render => "Render",
            ViewportTab::SolarRadiation => "Solar Radiation",
            ViewportTab::Bake => "Bake",
            ViewportTab::Lidar => "LIDAR",
        }
    }

    /// Text standing in for the view.
    pub fn placeholder(self) -> &'static str {
        match self {
            ViewportTab::Render => "Render viewport placeholder",
            ViewportTab::SolarRadiation => "Solar radiation viewport placeholder",
            ViewportTab::Bake => "Bake viewport placeholder",
            ViewportTab::Lidar => "LIDAR viewport placeholder",
        }
    }
}

/// Placeholder viewport with one tab per view.
#[derive(Debug)]
pub struct ViewportPanel {
    name: PanelName,
    selected: usize,
}

impl ViewportPanel {
    /// Viewport on the Render tab.
    pub fn new() -> Self {
        Self {
            name: PanelName::from_static("viewport"),
            selected: 0,
        }
    }

    /// Currently shown tab.
    pub fn selected_tab(&self) -> ViewportTab {
        ViewportTab::ALL[self.selected]
    }

    fn next_tab(&mut self) {
        self.selected = (self.selected + 1) % ViewportTab::ALL.len();
    }

    fn prev_tab(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(ViewportTab::ALL.len() - 1);
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ViewportPanel {
    fn name(&self) -> &PanelName {
        &self.name
    }

    fn title(&self, _ctx: &PanelContext<'_>) -> String {
        "Viewport".to_string()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext<'_>) {
        let [tab_area, body_area] = Layout::vertical([
            Constraint::Length(VIEWPORT_TAB_HEIGHT),
            Constraint::Min(0),
        ])
        .areas(area);

        let labels: Vec<&str> = ViewportTab::ALL.iter().map(|tab| tab.label()).collect();
        render_tab_bar(frame, tab_area, &labels, Some(self.selected), ctx.styles);

        frame.render_widget(
            Paragraph::new(self.selected_tab().placeholder()).style(ctx.styles.muted),
            body_area,
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<PanelCommand> {
        match key.code {
            KeyCode::Char(']') | KeyCode::Right => self.next_tab(),
            KeyCode::Char('[') | KeyCode::Left => self.prev_tab(),
            _ => {}
        }
        None
    }
}
