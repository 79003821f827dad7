//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the menu strip in lines.
///
/// The dockspace starts directly below it.
pub const MENU_BAR_HEIGHT: u16 = 1;

/// Width of the "File" dropdown including its border.
pub const MENU_DROPDOWN_WIDTH: u16 = 24;

/// Columns the "File" label occupies in the menu strip, padding included.
pub const MENU_TITLE_WIDTH: u16 = 6;

/// Width of the properties panel's side tab column including its border.
pub const SIDE_TAB_WIDTH: u16 = 12;

/// Height of the viewport tab row.
pub const VIEWPORT_TAB_HEIGHT: u16 = 1;
