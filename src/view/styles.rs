//! Colors for panel frames, the menu strip and selections.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Explicit setting, ignoring the environment.
    pub fn enabled(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== ShellStyles =====

/// Styles shared by every panel.
///
/// Without colors, focus and selection fall back to bold/reversed text so
/// they stay visible on monochrome terminals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellStyles {
    /// Border of unfocused panels
    pub border: Style,
    /// Border of the focused panel and the dropdown
    pub focused_border: Style,
    /// Menu strip background
    pub menu_bar: Style,
    /// Highlighted entry of an open menu, selected tab
    pub selection: Style,
    /// Placeholder text and hints
    pub muted: Style,
}

impl ShellStyles {
    /// Styles for the given color setting; monochrome uses bold and reversed.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                border: Style::default().fg(Color::DarkGray),
                focused_border: Style::default().fg(Color::Yellow),
                menu_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
                selection: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::Gray),
            }
        } else {
            Self {
                border: Style::default(),
                focused_border: Style::default().add_modifier(Modifier::BOLD),
                menu_bar: Style::default().add_modifier(Modifier::REVERSED),
                selection: Style::default().add_modifier(Modifier::REVERSED),
                muted: Style::default(),
            }
        }
    }

    /// Border style for a panel frame.
    pub fn border_for(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.border
        }
    }
}

impl Default for ShellStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::enabled(true))
    }
}

// ===== Tests =====
