//! Panel abstraction and the ordered registry the frame driver draws from.

use crate::dock::RegionTree;
use crate::model::{KeyAction, PanelName};
use crate::state::ConsoleState;
use crate::view::styles::ShellStyles;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use thiserror::Error;

/// Where a panel lives on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The single-row strip above the dockspace
    MenuBar,
    /// A leaf of the region tree, chosen by the layout
    Docked,
}

/// Read-only view of shared state handed to panels while drawing.
///
/// Panels must not change the console or the layout during a draw; any
/// change they want goes back to the driver as a [`PanelCommand`] from
/// input handling.
#[derive(Debug, Clone, Copy)]
pub struct PanelContext<'a> {
    /// Console lines, oldest first
    pub console: &'a ConsoleState,
    /// Region tree of this run
    pub tree: &'a RegionTree,
    /// Shared styles
    pub styles: &'a ShellStyles,
    /// Whether this panel has keyboard focus
    pub focused: bool,
    /// New console lines arrived this frame; the console view jumps to them
    pub scroll_to_latest: bool,
}

/// Side effects a panel asks the driver to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    /// Append a line to the console
    Log(String),
    /// Empty the console
    ClearConsole,
}

/// A named, independently drawn region consumer.
pub trait Panel {
    /// Stable identifier used by dock bindings.
    fn name(&self) -> &PanelName;

    /// Text shown in the panel's frame border.
    fn title(&self, ctx: &PanelContext<'_>) -> String;

    /// Where the panel is placed in the layout.
    fn placement(&self) -> Placement {
        Placement::Docked
    }

    /// Draw the panel body into `area` (inside the border for docked panels).
    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext<'_>);

    /// Draw anything that floats above the other panels (dropdowns).
    fn draw_overlay(&mut self, _frame: &mut Frame, _screen: Rect, _ctx: &PanelContext<'_>) {}

    /// Whether the panel wants every key before global bindings see it.
    fn captures_input(&self) -> bool {
        false
    }

    /// A key routed to this panel, either because it has focus or because
    /// it captures input.
    fn handle_key(&mut self, _key: KeyEvent) -> Option<PanelCommand> {
        None
    }

    /// A global action no other part of the driver consumed.
    fn handle_action(&mut self, _action: KeyAction) -> Option<PanelCommand> {
        None
    }
}

/// Attempt to register two panels under one name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Panel '{0}' is registered twice")]
pub struct DuplicatePanelError(pub PanelName);

/// Panels in registration order. Drawing follows this order every frame.
#[derive(Default)]
pub struct PanelRegistry {
    panels: Vec<Box<dyn Panel>>,
}

impl PanelRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a panel after those already registered.
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePanelError` if the name is taken.
    pub fn register(&mut self, panel: Box<dyn Panel>) -> Result<(), DuplicatePanelError> {
        if self.contains(panel.name()) {
            return Err(DuplicatePanelError(panel.name().clone()));
        }
        self.panels.push(panel);
        Ok(())
    }

    /// Whether a panel called `name` is registered.
    pub fn contains(&self, name: &PanelName) -> bool {
        self.position(name).is_some()
    }

    /// Registration index of the panel called `name`.
    pub fn position(&self, name: &PanelName) -> Option<usize> {
        self.panels.iter().position(|panel| panel.name() == name)
    }

    /// Panel at registration position `index`.
    pub fn get(&self, index: usize) -> Option<&dyn Panel> {
        self.panels.get(index).map(|panel| panel.as_ref())
    }

    /// Mutable panel at registration position `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Panel + 'static)> {
        self.panels.get_mut(index).map(|panel| panel.as_mut())
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &PanelName> {
        self.panels.iter().map(|panel| panel.name())
    }

    /// Panels in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Panel>> {
        self.panels.iter_mut()
    }

    /// Number of registered panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

impl std::fmt::Debug for PanelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank(PanelName);

    impl Panel for Blank {
        fn name(&self) -> &PanelName {
            &self.0
        }

        fn title(&self, _ctx: &PanelContext<'_>) -> String {
            self.0.to_string()
        }

        fn draw(&mut self, _frame: &mut Frame, _area: Rect, _ctx: &PanelContext<'_>) {}
    }

    fn blank(name: &str) -> Box<dyn Panel> {
        Box::new(Blank(PanelName::new(name).unwrap()))
    }

    #[test]
    fn registry_keeps_registration_order() {
        let mut registry = PanelRegistry::new();
        registry.register(blank("b")).unwrap();
        registry.register(blank("a")).unwrap();
        registry.register(blank("c")).unwrap();

        let names: Vec<&str> = registry.names().map(PanelName::as_str).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn registry_rejects_duplicate_names() {
        let mut registry = PanelRegistry::new();
        registry.register(blank("console")).unwrap();

        let result = registry.register(blank("console"));

        assert_eq!(
            result,
            Err(DuplicatePanelError(PanelName::new("console").unwrap()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn position_finds_registered_panel() {
        let mut registry = PanelRegistry::new();
        registry.register(blank("a")).unwrap();
        registry.register(blank("b")).unwrap();

        assert_eq!(registry.position(&PanelName::new("b").unwrap()), Some(1));
        assert_eq!(registry.position(&PanelName::new("z").unwrap()), None);
    }

    #[test]
    fn default_placement_is_docked() {
        let panel = blank("a");
        assert_eq!(panel.placement(), Placement::Docked);
        assert!(!panel.captures_input());
    }
}
