pub mod listing_card;
pub mod results;
pub mod search_bar;

use crate::core::search::Route;

/// Outcome of offering a key event to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewInput {
    /// Handled; nothing else to do.
    Consumed,
    /// Handled; the app should move to this location.
    Navigate(Route),
    /// Not for this view; fall through to global bindings.
    Ignored,
}
