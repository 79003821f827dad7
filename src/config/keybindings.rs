//! Keyboard bindings configuration.

use crate::model::key_action::{KeyAction, MenuItem};
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to application-level actions.
///
/// Panel-local keys (scrolling the console, switching viewport tabs) are not
/// listed here; they are offered to the focused panel when no global binding
/// matches.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part in the lookup.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();

        // Window close request
        bindings.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        // Focus switching
        bindings.insert(
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            KeyAction::CycleFocus,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            KeyAction::CycleFocusBack,
        );

        // Menu
        bindings.insert(
            KeyEvent::new(KeyCode::F(10), KeyModifiers::NONE),
            KeyAction::OpenMenu,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('f'), KeyModifiers::ALT),
            KeyAction::OpenMenu,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL),
            KeyAction::Menu(MenuItem::Open),
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            KeyAction::Menu(MenuItem::Save),
        );

        // Console
        bindings.insert(
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
            KeyAction::ClearConsole,
        );

        Self { bindings }
    }
}
