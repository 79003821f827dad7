//! One-row tab strip widget.
//!
//! Selection state is owned by the panel that draws the strip.

use crate::view::styles::ShellStyles;
use ratatui::{layout::Rect, text::Line, widgets::Tabs, Frame};

/// Render a tab strip.
///
/// # Behavior
/// - Shows one tab per title, in order
/// - Highlights the selected tab if `Some(index)` and the index is in bounds
/// - Out-of-bounds indices are treated as `None`
pub fn render_tab_bar(
    frame: &mut Frame,
    area: Rect,
    titles: &[&str],
    selected_tab: Option<usize>,
    styles: &ShellStyles,
) {
    let validated_selection = selected_tab.filter(|&idx| idx < titles.len());

    let mut tabs = Tabs::new(titles.iter().map(|title| Line::from(*title)))
        .style(styles.muted)
        .divider("|");

    // Tabs always highlights something; without a selection skip the style
    if let Some(idx) = validated_selection {
        tabs = tabs.highlight_style(styles.selection).select(idx);
    }

    frame.render_widget(tabs, area);
}
