//! "File" menu dropdown state.

use crate::model::MenuItem;

/// Open/closed state of the menu and the highlighted entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
    highlighted: usize,
}

impl MenuState {
    /// Whether the dropdown is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the dropdown with the first item highlighted.
    pub fn open(&mut self) {
        self.open = true;
        self.highlighted = 0;
    }

    /// Hide the dropdown.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Highlight the next item, wrapping at the end.
    pub fn next(&mut self) {
        self.highlighted = (self.highlighted + 1) % MenuItem::ALL.len();
    }

    /// Highlight the previous item, wrapping at the start.
    pub fn prev(&mut self) {
        self.highlighted = self
            .highlighted
            .checked_sub(1)
            .unwrap_or(MenuItem::ALL.len() - 1);
    }

    /// Item Enter would activate.
    pub fn highlighted(&self) -> MenuItem {
        MenuItem::ALL[self.highlighted]
    }

    /// Activate the highlighted item and close the dropdown.
    ///
    /// Returns `None` when the menu is closed.
    pub fn activate(&mut self) -> Option<MenuItem> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(self.highlighted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_starts_closed() {
        let menu = MenuState::default();
        assert!(!menu.is_open());
    }

    #[test]
    fn open_highlights_first_item() {
        let mut menu = MenuState::default();
        menu.next();
        menu.open();
        assert!(menu.is_open());
        assert_eq!(menu.highlighted(), MenuItem::Open);
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut menu = MenuState::default();
        menu.open();

        menu.prev();
        assert_eq!(menu.highlighted(), MenuItem::Exit);

        menu.next();
        assert_eq!(menu.highlighted(), MenuItem::Open);
    }

    #[test]
    fn activate_returns_item_and_closes() {
        let mut menu = MenuState::default();
        menu.open();
        menu.next();
        menu.next();

        assert_eq!(menu.activate(), Some(MenuItem::SaveAs));
        assert!(!menu.is_open());
    }

    #[test]
    fn activate_when_closed_returns_none() {
        let mut menu = MenuState::default();
        assert_eq!(menu.activate(), None);
    }
}
