/// listing-search - Marketplace Listing Search (TUI Edition)
///
/// Core library providing debounced quick matches, search insights,
/// the suggestion dropdown, grouped results and the category index
/// for a listings marketplace backend.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
