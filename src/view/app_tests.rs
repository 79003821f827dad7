//! Frame driver tests over ratatui's TestBackend.

use super::*;
use crate::dock::LayoutSpec;
use crate::model::MenuItem;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::backend::TestBackend;

// ===== Helpers =====

fn create_app(console: &mut Console, width: u16, height: u16) -> App<'_, TestBackend> {
    let panels = standard_panels().unwrap();
    let layout = DockLayout::new(LayoutSpec::default(), |name| panels.contains(name)).unwrap();
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    App::new(
        terminal,
        console,
        panels,
        layout,
        KeyBindings::default(),
        ShellStyles::default(),
        Duration::ZERO,
    )
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
}

fn row(app: &App<'_, TestBackend>, y: u16) -> String {
    let buffer = app.terminal().backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

fn screen(app: &App<'_, TestBackend>) -> String {
    let height = app.terminal().backend().buffer().area.height;
    (0..height).map(|y| row(app, y)).collect::<Vec<_>>().join("\n")
}

fn console_lines(app: &App<'_, TestBackend>) -> Vec<String> {
    app.console()
        .state()
        .lines()
        .iter()
        .map(|line| line.as_str().to_string())
        .collect()
}

fn focused<'a>(app: &'a App<'_, TestBackend>) -> Option<&'a str> {
    app.focused_panel_name().map(PanelName::as_str)
}

// ===== Layout lifecycle =====

#[test]
fn first_frame_builds_layout_and_later_frames_reuse_it() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);
    let mut events = EventSource::scripted([]);

    assert!(!app.layout().is_built());

    let first = app.frame(&mut events).unwrap();
    let tree_after_first = app.layout().tree().cloned();
    let second = app.frame(&mut events).unwrap();

    assert!(first.layout_built);
    assert!(!second.layout_built);
    assert_eq!(app.layout().tree().cloned(), tree_after_first);
}

#[test]
fn input_is_handled_before_first_build() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);
    let mut events = EventSource::scripted([ctrl('o')]);

    let report = app.frame(&mut events).unwrap();

    assert_eq!(report.events, 1);
    assert!(report.layout_built);
    assert_eq!(console_lines(&app), vec!["File > Open clicked"]);
}

// ===== Console flag =====

#[test]
fn startup_line_is_visible_and_scroll_request_consumed_by_render() {
    let mut console = Console::disabled(100);
    announce_start(&mut console);
    assert!(console.state().scroll_requested());

    let mut app = create_app(&mut console, 80, 24);
    app.frame(&mut EventSource::scripted([])).unwrap();

    assert_eq!(console_lines(&app), vec![STARTUP_MESSAGE]);
    assert!(!app.console().state().scroll_requested());
    assert!(screen(&app).contains(STARTUP_MESSAGE));
}

#[test]
fn clear_shortcut_empties_console() {
    let mut console = Console::disabled(100);
    console.log("one");
    console.log("two");
    let mut app = create_app(&mut console, 80, 24);

    app.frame(&mut EventSource::scripted([ctrl('l')])).unwrap();
    app.frame(&mut EventSource::scripted([])).unwrap();

    assert!(console_lines(&app).is_empty());
    assert!(row(&app, 18).starts_with("┌Console (0 lines)"));
}

#[test]
fn c_clears_console_only_when_focused() {
    let mut console = Console::disabled(100);
    console.log("kept");
    let mut app = create_app(&mut console, 80, 24);

    app.frame(&mut EventSource::scripted([key(KeyCode::Char('c'))])).unwrap();
    assert_eq!(console_lines(&app), vec!["kept"], "Viewport has focus");

    app.frame(&mut EventSource::scripted([
        shift_tab(),
        key(KeyCode::Char('c')),
    ]))
    .unwrap();
    assert!(console_lines(&app).is_empty());
}

fn shift_tab() -> Event {
    Event::Key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT))
}

// ===== Close signal =====

#[test]
fn ctrl_q_ends_run_after_current_frame() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);

    app.run(&mut EventSource::scripted([ctrl('q')])).unwrap();

    assert!(app.is_close_requested());
    assert_eq!(app.frame_count(), 1, "The frame that saw the request completes");
}

#[test]
fn ctrl_c_is_a_close_request() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);

    app.frame(&mut EventSource::scripted([ctrl('c')])).unwrap();

    assert!(app.is_close_requested());
}

#[test]
fn quit_works_while_menu_is_open() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);

    app.frame(&mut EventSource::scripted([key(KeyCode::F(10)), ctrl('q')]))
        .unwrap();

    assert!(app.is_close_requested());
}

// ===== Menu =====

#[test]
fn menu_navigation_logs_selected_item() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);

    app.frame(&mut EventSource::scripted([
        key(KeyCode::F(10)),
        key(KeyCode::Down),
        key(KeyCode::Enter),
    ]))
    .unwrap();

    assert_eq!(console_lines(&app), vec!["File > Save clicked"]);
}

#[test]
fn menu_exit_logs_and_keeps_running() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);

    app.frame(&mut EventSource::scripted([
        key(KeyCode::F(10)),
        key(KeyCode::Up),
        key(KeyCode::Enter),
    ]))
    .unwrap();

    assert_eq!(console_lines(&app), vec![MenuItem::Exit.console_message()]);
    assert!(!app.is_close_requested());
}

#[test]
fn open_menu_draws_dropdown_over_panels() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);

    app.frame(&mut EventSource::scripted([key(KeyCode::F(10))])).unwrap();

    let text = screen(&app);
    assert!(text.contains("Open..."));
    assert!(text.contains("Save As..."));
    assert!(text.contains("Alt+F4"));
}

#[test]
fn menu_keys_do_not_reach_focused_panel() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);

    app.frame(&mut EventSource::scripted([key(KeyCode::F(10)), key(KeyCode::Tab)]))
        .unwrap();

    assert_eq!(focused(&app), Some("viewport"));
}

// ===== Focus =====

#[test]
fn tab_cycles_focus_through_docked_panels() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);
    assert_eq!(focused(&app), Some("viewport"));

    let mut order = Vec::new();
    for _ in 0..4 {
        app.frame(&mut EventSource::scripted([key(KeyCode::Tab)])).unwrap();
        order.push(focused(&app).map(str::to_string));
    }

    assert_eq!(
        order,
        vec![
            Some("scene_graph".to_string()),
            Some("properties".to_string()),
            Some("console".to_string()),
            Some("viewport".to_string()),
        ]
    );

    app.frame(&mut EventSource::scripted([shift_tab()])).unwrap();
    assert_eq!(focused(&app), Some("console"));
}

#[test]
fn focus_skips_panels_missing_from_layout() {
    let mut console = Console::disabled(100);
    let panels = standard_panels().unwrap();
    let spec = LayoutSpec {
        splits: Vec::new(),
        docks: vec![crate::dock::DockBinding::new("console", "root").unwrap()],
    };
    let layout = DockLayout::new(spec, |name| panels.contains(name)).unwrap();
    let mut app = App::new(
        Terminal::new(TestBackend::new(40, 10)).unwrap(),
        &mut console,
        panels,
        layout,
        KeyBindings::default(),
        ShellStyles::default(),
        Duration::ZERO,
    );

    app.frame(&mut EventSource::scripted([key(KeyCode::Tab)])).unwrap();

    assert_eq!(focused(&app), Some("console"));
    assert!(row(&app, 1).starts_with("┌Console"));
}

// ===== Rendering =====

#[test]
fn default_frame_shows_every_panel() {
    let mut console = Console::disabled(100);
    console.log("hello");
    let mut app = create_app(&mut console, 160, 48);

    app.frame(&mut EventSource::scripted([])).unwrap();

    let text = screen(&app);
    assert!(row(&app, 0).contains("File"));
    assert!(text.contains("Viewport"));
    assert!(text.contains("Render viewport placeholder"));
    assert!(text.contains("Scene Graph"));
    assert!(text.contains("(scene tree placeholder)"));
    assert!(text.contains("Properties"));
    assert!(text.contains("(options placeholder)"));
    assert!(text.contains("Console (1 line)"));
    assert!(text.contains("hello"));
}

#[test]
fn panels_sit_in_their_regions() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);

    app.frame(&mut EventSource::scripted([])).unwrap();

    // Dockspace is rows 1..24: content column 60 wide, console from row 18
    assert!(row(&app, 1).starts_with("┌Viewport"));
    assert!(row(&app, 18).starts_with("┌Console"));
    assert!(row(&app, 1).contains("┌Scene Graph"));
}

#[test]
fn resize_moves_boundaries_but_keeps_ratios() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);
    app.frame(&mut EventSource::scripted([])).unwrap();

    app.terminal.backend_mut().resize(160, 48);
    let report = app
        .frame(&mut EventSource::scripted([Event::Resize(160, 48)]))
        .unwrap();

    assert!(!report.layout_built);
    // 47 dockspace rows: round(47 * 0.75) = 35 content rows starting at row 1
    assert!(row(&app, 36).starts_with("┌Console"));
    let scene_x = row(&app, 1).chars().position(|c| c == 'S').unwrap();
    assert_eq!(scene_x, 121, "Right column starts at round(160 * 0.75)");
}

#[test]
fn viewport_tabs_switch_when_focused() {
    let mut console = Console::disabled(100);
    let mut app = create_app(&mut console, 80, 24);

    app.frame(&mut EventSource::scripted([key(KeyCode::Char(']'))])).unwrap();

    assert!(screen(&app).contains("Solar radiation viewport placeholder"));
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}
