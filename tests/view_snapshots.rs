//! Snapshot tests for panel rendering
//!
//! Uses insta + ratatui TestBackend to verify rendering output doesn't regress.

use dockshell::dock::{LayoutSpec, RegionTree};
use dockshell::model::KeyAction;
use dockshell::state::ConsoleState;
use dockshell::view::{ConsolePanel, ConsoleView, MenuBarPanel, Panel, PanelContext, ShellStyles};
use insta::assert_snapshot;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

// ===== Test Helpers =====

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Empty trailing lines are removed to keep snapshots clean.
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

fn console_with(count: usize) -> ConsoleState {
    let mut state = ConsoleState::new(0);
    for i in 0..count {
        state.log(&format!("line {}", i));
    }
    state
}

// ===== Console =====

#[test]
fn snapshot_console_view_window() {
    let state = console_with(5);
    let mut terminal = Terminal::new(TestBackend::new(12, 3)).unwrap();

    terminal
        .draw(|frame| frame.render_widget(ConsoleView::new(state.lines(), 2), frame.area()))
        .unwrap();

    assert_snapshot!(buffer_to_string(terminal.backend().buffer()), @r"
    line 2
    line 3
    line 4
    ");
}

#[test]
fn snapshot_console_panel_follows_newest_line() {
    let state = console_with(5);
    let tree = RegionTree::from_spec(&LayoutSpec::default()).unwrap();
    let styles = ShellStyles::default();
    let ctx = PanelContext {
        console: &state,
        tree: &tree,
        styles: &styles,
        focused: true,
        scroll_to_latest: true,
    };
    let mut panel = ConsolePanel::new();
    let mut terminal = Terminal::new(TestBackend::new(24, 4)).unwrap();

    terminal
        .draw(|frame| panel.draw(frame, frame.area(), &ctx))
        .unwrap();

    assert_snapshot!(buffer_to_string(terminal.backend().buffer()), @r"
    [Clear] c / Ctrl+L
    line 2
    line 3
    line 4
    ");
}

// ===== Menu =====

#[test]
fn snapshot_file_menu_dropdown() {
    let state = ConsoleState::new(0);
    let tree = RegionTree::from_spec(&LayoutSpec::default()).unwrap();
    let styles = ShellStyles::default();
    let ctx = PanelContext {
        console: &state,
        tree: &tree,
        styles: &styles,
        focused: false,
        scroll_to_latest: false,
    };
    let mut menu = MenuBarPanel::new();
    menu.handle_action(KeyAction::OpenMenu);
    let mut terminal = Terminal::new(TestBackend::new(24, 7)).unwrap();

    terminal
        .draw(|frame| menu.draw_overlay(frame, frame.area(), &ctx))
        .unwrap();

    assert_snapshot!(buffer_to_string(terminal.backend().buffer()), @r"
    ┌──────────────────────┐
    │ Open...       Ctrl+O │
    │ Save          Ctrl+S │
    │ Save As...           │
    │ Exit          Alt+F4 │
    └──────────────────────┘
    ");
}
