pub mod logging;

// Listing search: quick matches, insights, suggestions, results and categories
pub mod search;
