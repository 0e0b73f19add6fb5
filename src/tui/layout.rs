//! Root layout computation for sidebar + main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the category sidebar.
pub const SIDEBAR_WIDTH: u16 = 24;
/// Hide sidebar entirely below this terminal width.
pub const HIDE_SIDEBAR_THRESHOLD: u16 = 60;
/// Height of the search bar row (bordered input).
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Sidebar area (None if hidden).
    pub sidebar: Option<Rect>,
    /// Search bar above the main content.
    pub search: Rect,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

/// Sidebar visibility derived from terminal width and the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarVisibility {
    Shown,
    Hidden,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    ///
    /// `wants_sidebar`: the current screen has a category sidebar.
    pub fn compute(area: Rect, wants_sidebar: bool) -> (Self, SidebarVisibility) {
        let visibility = if wants_sidebar && area.width >= HIDE_SIDEBAR_THRESHOLD {
            SidebarVisibility::Shown
        } else {
            SidebarVisibility::Hidden
        };

        let rows = Layout::vertical([
            Constraint::Min(1),    // Content (sidebar + main)
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = rows[0];
        let status = rows[1];

        let (sidebar, right) = match visibility {
            SidebarVisibility::Hidden => (None, content_area),
            SidebarVisibility::Shown => {
                let cols = Layout::horizontal([
                    Constraint::Length(SIDEBAR_WIDTH),
                    Constraint::Min(1),
                ])
                .split(content_area);
                (Some(cols[0]), cols[1])
            }
        };

        let stacked = Layout::vertical([
            Constraint::Length(SEARCH_BAR_HEIGHT),
            Constraint::Min(1),
        ])
        .split(right);

        (
            AppLayout {
                sidebar,
                search: stacked[0],
                main: stacked[1],
                status,
            },
            visibility,
        )
    }
}
