//! TUI rendering and terminal management (impure shell)

pub mod console_pane;
pub mod constants;
pub mod menu_bar;
pub mod panel;
pub mod properties;
pub mod scene_graph;
pub mod styles;
pub mod tabs;
pub mod viewport;

pub use console_pane::{ConsolePanel, ConsoleView};
pub use menu_bar::MenuBarPanel;
pub use panel::{DuplicatePanelError, Panel, PanelCommand, PanelContext, PanelRegistry, Placement};
pub use properties::PropertiesPanel;
pub use scene_graph::SceneGraphPanel;
pub use styles::{ColorConfig, ShellStyles};
pub use viewport::ViewportPanel;

use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::console::{CaptureStream, Console};
use crate::dock::{DockLayout, LayoutError, RegionTree};
use crate::model::{AppError, KeyAction, PanelName};
use crate::source::EventSource;
use crate::state::ConsoleState;
use constants::MENU_BAR_HEIGHT;
use crossterm::{
    cursor,
    event::{Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    widgets::{Block, Borders},
    Frame, Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// First console line of every run.
pub const STARTUP_MESSAGE: &str = "Application started";

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Layout could not be materialized
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Panel set is inconsistent
    #[error("Panel error: {0}")]
    Panel(#[from] DuplicatePanelError),
}

/// What one frame did. Mostly useful to tests and debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Console lines appended by the drain step
    pub drained: usize,
    /// Input events handled
    pub events: usize,
    /// Whether this frame built the region tree
    pub layout_built: bool,
}

/// Frame driver.
///
/// Generic over backend to support testing with TestBackend. The console is
/// borrowed so that its teardown happens after the terminal's, in reverse
/// order of setup.
pub struct App<'c, B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    console: &'c mut Console,
    panels: PanelRegistry,
    layout: DockLayout,
    key_bindings: KeyBindings,
    styles: ShellStyles,
    /// Registry indices of panels that can take focus, in registration order
    focus_order: Vec<usize>,
    /// Position in `focus_order`
    focus: Option<usize>,
    close_requested: bool,
    frame_interval: Duration,
    frame_count: u64,
}

impl<'c, B> App<'c, B>
where
    B: Backend,
{
    /// Create the driver. Nothing is drawn until the first frame.
    ///
    /// Focus starts on the first docked panel.
    pub fn new(
        terminal: Terminal<B>,
        console: &'c mut Console,
        panels: PanelRegistry,
        layout: DockLayout,
        key_bindings: KeyBindings,
        styles: ShellStyles,
        frame_interval: Duration,
    ) -> Self {
        let docked = layout.docked_panels();
        let focus_order: Vec<usize> = (0..panels.len())
            .filter(|&index| {
                panels.get(index).is_some_and(|panel| {
                    panel.placement() == Placement::Docked && docked.contains(&panel.name())
                })
            })
            .collect();
        let focus = if focus_order.is_empty() { None } else { Some(0) };

        Self {
            terminal,
            console,
            panels,
            layout,
            key_bindings,
            styles,
            focus_order,
            focus,
            close_requested: false,
            frame_interval,
            frame_count: 0,
        }
    }

    /// Run frames until a close request is observed.
    ///
    /// The close flag is checked at the top of every frame; a frame that has
    /// started always completes. Each frame is followed by a sleep for the
    /// rest of the frame interval.
    pub fn run(&mut self, events: &mut EventSource) -> Result<(), TuiError> {
        info!(interval = ?self.frame_interval, "Frame loop started");
        loop {
            if self.close_requested {
                info!(frames = self.frame_count, "Close requested; leaving frame loop");
                return Ok(());
            }

            let started = Instant::now();
            self.frame(events)?;

            if let Some(rest) = self.frame_interval.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    /// Run one frame: drain console, poll input, build layout (first frame
    /// only), draw panels in registration order, present.
    ///
    /// The scroll-to-latest request is consumed once the frame is presented.
    pub fn frame(&mut self, events: &mut EventSource) -> Result<FrameReport, TuiError> {
        let drained = self.console.drain();

        let polled = events.poll()?;
        let event_count = polled.len();
        for event in polled {
            self.handle_event(event);
        }

        let layout_built = self.layout.build_once()?;

        self.draw()?;
        self.console.state_mut().take_scroll_request();

        self.frame_count += 1;
        if drained > 0 || event_count > 0 {
            debug!(frame = self.frame_count, drained, events = event_count, "Frame");
        }

        Ok(FrameReport {
            drained,
            events: event_count,
            layout_built,
        })
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(width, height) => {
                // Regions are resolved from the frame area on every draw
                debug!(width, height, "Terminal resized");
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = self.key_bindings.get(key);

        if action == Some(KeyAction::Quit) {
            self.close_requested = true;
            return;
        }

        // An open dropdown sees every other key first
        let capturing = (0..self.panels.len())
            .find(|&index| self.panels.get(index).is_some_and(|panel| panel.captures_input()));
        if let Some(index) = capturing {
            let command = self.panels.get_mut(index).and_then(|panel| panel.handle_key(key));
            self.apply(command);
            return;
        }

        match action {
            Some(KeyAction::CycleFocus) => self.cycle_focus(true),
            Some(KeyAction::CycleFocusBack) => self.cycle_focus(false),
            Some(KeyAction::ClearConsole) => self.console.clear(),
            Some(action) => {
                let commands: Vec<PanelCommand> = self
                    .panels
                    .iter_mut()
                    .filter_map(|panel| panel.handle_action(action))
                    .collect();
                for command in commands {
                    self.apply(Some(command));
                }
            }
            None => {
                let command = self
                    .focused_panel()
                    .and_then(|index| self.panels.get_mut(index))
                    .and_then(|panel| panel.handle_key(key));
                self.apply(command);
            }
        }
    }

    fn apply(&mut self, command: Option<PanelCommand>) {
        match command {
            Some(PanelCommand::Log(text)) => {
                info!(message = %text, "Console message");
                self.console.log(&text);
            }
            Some(PanelCommand::ClearConsole) => self.console.clear(),
            None => {}
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let count = self.focus_order.len();
        let Some(current) = self.focus else {
            return;
        };
        self.focus = Some(if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        });
    }

    /// Registry index of the focused panel.
    fn focused_panel(&self) -> Option<usize> {
        self.focus.and_then(|position| self.focus_order.get(position).copied())
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let focused = self.focused_panel();
        let Some(tree) = self.layout.tree() else {
            return Ok(());
        };
        let console = self.console.state();
        let styles = &self.styles;
        let panels = &mut self.panels;

        self.terminal.draw(|frame| {
            render_shell(frame, panels, tree, console, styles, focused);
        })?;

        Ok(())
    }

    // ===== Accessors =====

    /// The console fed by this driver.
    pub fn console(&self) -> &Console {
        &*self.console
    }

    /// Layout state, unbuilt until the first frame.
    pub fn layout(&self) -> &DockLayout {
        &self.layout
    }

    /// The terminal frames are drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Whether a close request was seen.
    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    /// Name of the panel holding keyboard focus.
    pub fn focused_panel_name(&self) -> Option<&PanelName> {
        self.focused_panel()
            .and_then(|index| self.panels.get(index))
            .map(|panel| panel.name())
    }

    /// Frames completed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Compose one frame: menu strip on the first row, docked panels in their
/// leaves, then overlays on top of everything.
fn render_shell(
    frame: &mut Frame,
    panels: &mut PanelRegistry,
    tree: &RegionTree,
    console: &ConsoleState,
    styles: &ShellStyles,
    focused: Option<usize>,
) {
    let screen = frame.area();
    let [menu_area, dock_area] =
        Layout::vertical([Constraint::Length(MENU_BAR_HEIGHT), Constraint::Min(0)]).areas(screen);
    let leaves = tree.leaf_areas(dock_area);
    let context = move |index: usize| PanelContext {
        console,
        tree,
        styles,
        focused: focused == Some(index),
        scroll_to_latest: console.scroll_requested(),
    };

    for (index, panel) in panels.iter_mut().enumerate() {
        let ctx = context(index);
        match panel.placement() {
            Placement::MenuBar => panel.draw(frame, menu_area, &ctx),
            Placement::Docked => {
                let Some(leaf) = leaves.iter().find(|leaf| leaf.panel == Some(panel.name())) else {
                    continue;
                };
                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(panel.title(&ctx))
                    .border_style(styles.border_for(ctx.focused));
                let inner = block.inner(leaf.rect);
                frame.render_widget(block, leaf.rect);
                panel.draw(frame, inner, &ctx);
            }
        }
    }

    for (index, panel) in panels.iter_mut().enumerate() {
        panel.draw_overlay(frame, screen, &context(index));
    }
}

/// Panels of the shell in their fixed draw order.
pub fn standard_panels() -> Result<PanelRegistry, DuplicatePanelError> {
    let mut panels = PanelRegistry::new();
    panels.register(Box::new(MenuBarPanel::new()))?;
    panels.register(Box::new(ViewportPanel::new()))?;
    panels.register(Box::new(SceneGraphPanel::new()))?;
    panels.register(Box::new(PropertiesPanel::new()))?;
    panels.register(Box::new(ConsolePanel::new()))?;
    Ok(panels)
}

/// Write the startup line through the captured stream, so it reaches the
/// console the same way any other diagnostic output does.
///
/// Without capture the line is logged into the console directly.
pub fn announce_start(console: &mut Console) {
    let written = match console.stream() {
        Some(CaptureStream::Stderr) => {
            let mut err = io::stderr().lock();
            writeln!(err, "{}", STARTUP_MESSAGE).and_then(|()| err.flush())
        }
        Some(CaptureStream::Stdout) => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", STARTUP_MESSAGE).and_then(|()| out.flush())
        }
        None => {
            console.log(STARTUP_MESSAGE);
            return;
        }
    };

    if let Err(err) = written {
        warn!(error = %err, "Could not write startup line to captured stream");
        console.log(STARTUP_MESSAGE);
    }
}

// ===== Terminal session =====

/// Raw mode and alternate screen for as long as the value lives.
///
/// Dropping it restores the terminal, including when setup fails halfway.
#[derive(Debug)]
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    /// Take over the terminal and set its title.
    pub fn enter(title: &str) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let session = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, SetTitle(title), cursor::Hide)?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!(error = %err, "Failed to disable raw mode");
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
            warn!(error = %err, "Failed to leave alternate screen");
        }
    }
}

/// Initialize and run the shell with a resolved configuration.
///
/// Setup order is config and layout validation, console capture, terminal;
/// teardown runs in reverse on every exit path.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(config: &ResolvedConfig, colors: ColorConfig) -> Result<(), AppError> {
    config.validate()?;
    let panels = standard_panels().map_err(TuiError::from)?;
    let layout = DockLayout::new(config.layout.clone(), |name| panels.contains(name))?;

    let mut console = Console::install(&config.console);
    announce_start(&mut console);

    let session = TerminalSession::enter(&config.title)?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout())).map_err(TuiError::from)?;

    let mut app = App::new(
        terminal,
        &mut console,
        panels,
        layout,
        KeyBindings::default(),
        ShellStyles::with_color_config(colors),
        config.frame_interval(),
    );
    let result = app.run(&mut EventSource::Terminal);

    drop(app);
    drop(session);
    if let Err(err) = console.uninstall() {
        warn!(error = %err, "Failed to restore captured stream");
    }

    result.map_err(AppError::from)
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
