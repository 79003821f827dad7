//! Domain-level keyboard actions independent of key bindings.

/// Entries of the "File" menu.
///
/// Every item is a stub: activating one only writes a line to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    /// "Open..."
    Open,
    /// "Save"
    Save,
    /// "Save As..."
    SaveAs,
    /// "Exit"; a stub like the others, it does not close the shell
    Exit,
}

impl MenuItem {
    /// All items in display order.
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Open,
        MenuItem::Save,
        MenuItem::SaveAs,
        MenuItem::Exit,
    ];

    /// Label shown inside the dropdown.
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Open => "Open...",
            MenuItem::Save => "Save",
            MenuItem::SaveAs => "Save As...",
            MenuItem::Exit => "Exit",
        }
    }

    /// Shortcut hint shown next to the label.
    pub fn shortcut(self) -> Option<&'static str> {
        match self {
            MenuItem::Open => Some("Ctrl+O"),
            MenuItem::Save => Some("Ctrl+S"),
            MenuItem::SaveAs => None,
            MenuItem::Exit => Some("Alt+F4"),
        }
    }

    /// Console line written when the item is activated.
    pub fn console_message(self) -> &'static str {
        match self {
            MenuItem::Open => "File > Open clicked",
            MenuItem::Save => "File > Save clicked",
            MenuItem::SaveAs => "File > Save As clicked",
            MenuItem::Exit => "File > Exit clicked",
        }
    }
}

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Window close request. Default: Ctrl+Q / Ctrl+C
    Quit,
    /// Move focus to the next docked panel. Default: Tab
    CycleFocus,
    /// Move focus to the previous docked panel. Default: Shift+Tab
    CycleFocusBack,
    /// Open the "File" menu. Default: F10 / Alt+F
    OpenMenu,
    /// Activate a menu item directly through its shortcut.
    Menu(MenuItem),
    /// Empty the console line store. Default: Ctrl+L
    ClearConsole,
}
