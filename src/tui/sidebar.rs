//! Category sidebar on the results screen.
//!
//! Lists popular categories first, then every category. Each entry browses
//! the listing collection filtered to that category; the active filter is
//! highlighted by exact name.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::search::{CategoryIndex, Route, SearchParams};

use super::theme;

/// Sidebar navigation state.
#[derive(Debug, Default)]
pub struct SidebarState {
    /// `None` until the category source has answered.
    index: Option<CategoryIndex>,
    /// Highlighted entry (popular entries first, then all categories).
    pub selected: usize,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.index.is_none()
    }

    pub fn set_index(&mut self, index: CategoryIndex) {
        self.index = Some(index);
        self.selected = self.selected.min(self.len().saturating_sub(1));
    }

    fn entries(&self) -> impl Iterator<Item = &str> {
        self.index
            .iter()
            .flat_map(|i| i.popular.iter().chain(i.categories.iter()))
            .map(String::as_str)
    }

    fn len(&self) -> usize {
        self.entries().count()
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        let len = self.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection up.
    pub fn select_prev(&mut self) {
        let len = self.len();
        if len == 0 {
            return;
        }
        if self.selected == 0 {
            self.selected = len - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.entries().nth(self.selected)
    }

    /// Route for the highlighted category.
    pub fn selected_route(&self) -> Option<Route> {
        self.selected_category()
            .map(|name| Route::Listings(SearchParams::category(name)))
    }

    /// Render the sidebar.
    pub fn render(&self, frame: &mut Frame, area: Rect, active: &str, focused: bool) {
        let mut lines: Vec<Line> = Vec::new();

        match &self.index {
            None => {
                lines.push(Line::from(Span::styled(" Categories", theme::section())));
                lines.push(Line::from(Span::styled(
                    "  Loading categories...",
                    theme::secondary(),
                )));
            }
            Some(index) => {
                let mut idx = 0usize;
                for (title, names) in [
                    ("Popular", &index.popular),
                    ("Categories", &index.categories),
                ] {
                    if names.is_empty() {
                        continue;
                    }
                    if !lines.is_empty() {
                        lines.push(Line::raw(""));
                    }
                    lines.push(Line::from(Span::styled(format!(" {title}"), theme::section())));
                    for name in names {
                        let is_active = CategoryIndex::is_active(name, active);
                        let is_selected = focused && idx == self.selected;
                        lines.push(entry_line(name, is_active, is_selected, area.width));
                        idx += 1;
                    }
                }
                if lines.is_empty() {
                    lines.push(Line::from(Span::styled(" Categories", theme::section())));
                    lines.push(Line::from(Span::styled("  No categories", theme::faint())));
                }
            }
        }

        frame.render_widget(
            Paragraph::new(lines).style(theme::surface()),
            area,
        );
    }
}

fn entry_line(name: &str, is_active: bool, is_selected: bool, width: u16) -> Line<'static> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let style = match (is_active, is_selected) {
        (true, _) => theme::active(),
        (false, true) => theme::body_strong(),
        (false, false) => theme::secondary(),
    };
    // Pad to fill sidebar width
    let padded = format!("{:<width$}", format!("{prefix}{name}"), width = width as usize);
    Line::from(Span::styled(padded, style))
}
