//! Main menu strip with the "File" dropdown.
//!
//! Every item is a stub that writes one console line; the file I/O behind
//! them is an external collaborator. "Exit" does not close the shell.

use crate::model::{KeyAction, MenuItem, PanelName};
use crate::state::MenuState;
use crate::view::constants::{MENU_DROPDOWN_WIDTH, MENU_TITLE_WIDTH};
use crate::view::panel::{Panel, PanelCommand, PanelContext, Placement};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// The menu strip on the first row, with its "File" dropdown.
#[derive(Debug)]
pub struct MenuBarPanel {
    name: PanelName,
    menu: MenuState,
}

impl MenuBarPanel {
    /// Menu strip with the dropdown closed.
    pub fn new() -> Self {
        Self {
            name: PanelName::from_static("menu_bar"),
            menu: MenuState::default(),
        }
    }

    /// Dropdown state.
    pub fn menu(&self) -> &MenuState {
        &self.menu
    }
}

impl Default for MenuBarPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Dropdown rectangle anchored below the "File" label, clipped to `screen`.
pub fn dropdown_area(screen: Rect) -> Rect {
    // Items plus top and bottom border
    let height = MenuItem::ALL.len() as u16 + 2;
    Rect {
        x: screen.x,
        y: screen.y.saturating_add(1),
        width: MENU_DROPDOWN_WIDTH,
        height,
    }
    .intersection(screen)
}

fn item_line(item: MenuItem, width: u16) -> Line<'static> {
    let label = item.label();
    let shortcut = item.shortcut().unwrap_or("");
    // Two border columns and one space of padding each side
    let inner = usize::from(width.saturating_sub(4));
    let gap = inner.saturating_sub(label.width() + shortcut.width()).max(1);
    Line::from(format!(" {}{}{} ", label, " ".repeat(gap), shortcut))
}

impl Panel for MenuBarPanel {
    fn name(&self) -> &PanelName {
        &self.name
    }

    fn title(&self, _ctx: &PanelContext<'_>) -> String {
        "File".to_string()
    }

    fn placement(&self) -> Placement {
        Placement::MenuBar
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &PanelContext<'_>) {
        let file_style = if self.menu.is_open() {
            ctx.styles.selection
        } else {
            ctx.styles.menu_bar
        };
        let label = format!("{:^width$}", "File", width = usize::from(MENU_TITLE_WIDTH));
        let strip = Line::from(vec![Span::styled(label, file_style)]);
        frame.render_widget(Paragraph::new(strip).style(ctx.styles.menu_bar), area);
    }

    fn draw_overlay(&mut self, frame: &mut Frame, screen: Rect, ctx: &PanelContext<'_>) {
        if !self.menu.is_open() {
            return;
        }
        let area = dropdown_area(screen);
        if area.is_empty() {
            return;
        }

        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .map(|item| ListItem::new(item_line(*item, area.width)))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(ctx.styles.focused_border),
            )
            .highlight_style(ctx.styles.selection);

        let highlighted = MenuItem::ALL
            .iter()
            .position(|item| *item == self.menu.highlighted());
        let mut state = ListState::default().with_selected(highlighted);

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn captures_input(&self) -> bool {
        self.menu.is_open()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<PanelCommand> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.menu.next(),
            KeyCode::Up | KeyCode::Char('k') => self.menu.prev(),
            KeyCode::Enter => {
                return self
                    .menu
                    .activate()
                    .map(|item| PanelCommand::Log(item.console_message().to_string()));
            }
            KeyCode::Esc | KeyCode::F(10) => self.menu.close(),
            _ => {}
        }
        None
    }

    fn handle_action(&mut self, action: KeyAction) -> Option<PanelCommand> {
        match action {
            KeyAction::OpenMenu => {
                self.menu.open();
                None
            }
            KeyAction::Menu(item) => Some(PanelCommand::Log(item.console_message().to_string())),
            _ => None,
        }
    }
}
