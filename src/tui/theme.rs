//! Styles for the listing screens.
//!
//! Views ask for a style by what it marks (a price, a category heading,
//! the active sort key) and never pick colours themselves.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

const TEAL: Color = Color::Rgb(0x00, 0x80, 0x80);
const TEAL_LIGHT: Color = Color::Rgb(0x00, 0x96, 0x88);
const CORAL: Color = Color::Rgb(0xFF, 0x7F, 0x50);
const CORAL_SOFT: Color = Color::Rgb(0xFF, 0x8A, 0x65);
const CHARCOAL: Color = Color::Rgb(0x0A, 0x19, 0x19);
const SURFACE: Color = Color::Rgb(0x12, 0x26, 0x26);
const FOREGROUND: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
const GREY: Color = Color::Rgb(0x80, 0x80, 0x80);
const SLATE: Color = Color::Rgb(0x50, 0x50, 0x50);
const AMBER: Color = Color::Rgb(0xFF, 0xA7, 0x26);
const SKY: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Text ────────────────────────────────────────────────────────────────────

/// Listing titles, typed text, dropdown entries.
pub fn body() -> Style {
    Style::default().fg(FOREGROUND)
}

/// Emphasised body text: card titles, the highlighted sidebar entry.
pub fn body_strong() -> Style {
    body().add_modifier(Modifier::BOLD)
}

/// Captions, locations, loading notices.
pub fn secondary() -> Style {
    Style::default().fg(GREY)
}

/// Placeholders, key hints, inactive sort keys.
pub fn faint() -> Style {
    Style::default().fg(SLATE)
}

/// Dropdown section titles, category group headers.
pub fn section() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// The highlighted card or dropdown entry.
pub fn selected() -> Style {
    Style::default()
        .fg(CHARCOAL)
        .bg(TEAL_LIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active sort key, active category filter, page headline.
pub fn active() -> Style {
    Style::default().fg(CORAL).add_modifier(Modifier::BOLD)
}

// ── Listings ────────────────────────────────────────────────────────────────

pub fn price() -> Style {
    active()
}

pub fn image_url() -> Style {
    Style::default().fg(SKY)
}

/// "View all results" and "View All Listings".
pub fn link() -> Style {
    Style::default().fg(CORAL_SOFT).add_modifier(Modifier::BOLD)
}

/// "No results found".
pub fn empty_state() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

// ── Chrome ──────────────────────────────────────────────────────────────────

/// Current location in the status bar.
pub fn location() -> Style {
    Style::default().fg(TEAL_LIGHT)
}

/// "Opened /listings/{id}" in the status bar.
pub fn notice() -> Style {
    Style::default().fg(SKY)
}

pub fn brand_badge() -> Style {
    Style::default()
        .fg(CHARCOAL)
        .bg(CORAL)
        .add_modifier(Modifier::BOLD)
}

/// Background of the sidebar and the suggestion dropdown.
pub fn surface() -> Style {
    Style::default().bg(SURFACE)
}

/// Titled, bordered panel; the border lights up when focused.
pub fn panel(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { TEAL } else { SLATE }))
}

/// Untitled overlay frame for the suggestion dropdown.
pub fn dropdown() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(TEAL))
        .style(surface())
}
