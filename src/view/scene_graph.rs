//! Scene graph panel. The scene model is an external collaborator.

use crate::model::PanelName;
use crate::view::panel::{Panel, PanelContext};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};

/// Text standing in for the scene tree.
pub const SCENE_GRAPH_PLACEHOLDER: &str = "(scene tree placeholder)";

/// Placeholder scene tree panel.
#[derive(Debug)]
pub struct SceneGraphPanel {
    name: PanelName,
}

impl SceneGraphPanel {
    /// The panel.
    pub fn new() -> Self {
        Self {
            name: PanelName::from_static("scene_graph"),
        }
    }
}

impl Default for SceneGraphPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for SceneGraphPanel {
    fn name(&self) -> &PanelName {
        &self.name
    }

    fn title(&self, _ctx: &PanelContext<'_>) -> String {
        "Scene Graph".to_string()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext<'_>) {
        frame.render_widget(
            Paragraph::new(SCENE_GRAPH_PLACEHOLDER).style(ctx.styles.muted),
            area,
        );
    }
}
