//! Root layout computation for main content + status bar, and the browser's
//! filter-panel/results split.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the category filter panel.
pub const FILTER_PANEL_WIDTH: u16 = 22;
/// Hide the filter panel entirely below this terminal width.
pub const HIDE_FILTERS_THRESHOLD: u16 = 56;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        AppLayout {
            main: rows[0],
            status: rows[1],
        }
    }
}

/// Split the browser area into an optional filter panel and the results
/// area. Narrow terminals drop the panel; filtering still works via its
/// keybindings applied from the results zone.
pub fn split_browser(area: Rect) -> (Option<Rect>, Rect) {
    if area.width < HIDE_FILTERS_THRESHOLD {
        return (None, area);
    }
    let cols = Layout::horizontal([
        Constraint::Length(FILTER_PANEL_WIDTH),
        Constraint::Min(1),
    ])
    .split(area);
    (Some(cols[0]), cols[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bar_is_one_row() {
        let layout = AppLayout::compute(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.main.height, 23);
    }

    #[test]
    fn test_wide_terminal_shows_filter_panel() {
        let (panel, results) = split_browser(Rect::new(0, 0, 100, 30));
        let panel = panel.unwrap();
        assert_eq!(panel.width, FILTER_PANEL_WIDTH);
        assert_eq!(results.width, 100 - FILTER_PANEL_WIDTH);
    }

    #[test]
    fn test_narrow_terminal_hides_filter_panel() {
        let area = Rect::new(0, 0, HIDE_FILTERS_THRESHOLD - 1, 30);
        let (panel, results) = split_browser(area);
        assert!(panel.is_none());
        assert_eq!(results, area);
    }
}
