//! Listing card: title, price, location and primary image (or placeholder).

use ratatui::text::{Line, Span};

use crate::core::search::models::format_price;
use crate::core::search::Listing;
use crate::tui::theme;

pub const NO_IMAGE: &str = "[no image]";

/// Rows taken by one card.
pub const CARD_HEIGHT: usize = 3;

/// Lines for one listing card.
pub fn card_lines(listing: &Listing, selected: bool) -> Vec<Line<'static>> {
    let (marker, title_style) = if selected {
        ("▸ ", theme::selected())
    } else {
        ("  ", theme::body_strong())
    };

    let title = Line::from(vec![
        Span::styled(marker, theme::price()),
        Span::styled(listing.title.clone(), title_style),
        Span::raw("  "),
        Span::styled(format_price(listing.price), theme::price()),
    ]);

    let location = if listing.location.is_empty() {
        Span::styled("Location not listed", theme::faint())
    } else {
        Span::styled(listing.location.clone(), theme::secondary())
    };

    let image = match listing.primary_image() {
        Some(image) => Span::styled(image.image_url.clone(), theme::image_url()),
        None => Span::styled(NO_IMAGE, theme::faint()),
    };

    vec![
        title,
        Line::from(vec![Span::raw("    "), location]),
        Line::from(vec![Span::raw("    "), image]),
    ]
}
