//! Listing search and suggestions.
//!
//! Debounced quick matches, one-shot insights, the merged suggestion
//! dropdown, the grouped results page and the category index, all on top
//! of a single [`SearchBackend`] contract.

pub mod backend;
pub mod categories;
pub mod debounce;
pub mod device;
pub mod error;
pub mod grouping;
pub mod http;
pub mod insights;
pub mod models;
pub mod query_log;
pub mod quick_match;
pub mod results;
pub mod route;
pub mod search_bar;
pub mod suggestions;

pub use backend::SearchBackend;
pub use categories::{category_source, CategoryIndex, CategorySource, CategorySourceKind};
pub use error::{Result, SearchError};
pub use http::HttpSearchBackend;
pub use models::{
    DeviceType, InsightsSnapshot, Listing, ListingImage, PopularSearch, QueryLogEntry,
    QuickResult, SearchParams, SortKey,
};
pub use query_log::QueryLogger;
pub use quick_match::QuickMatchFetcher;
pub use results::{ListingsSearchView, ResultsStatus};
pub use route::Route;
pub use search_bar::SearchBar;

/// What happened to an async response when it reached its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response belonged to the latest request and was applied.
    Applied,
    /// A newer request superseded it; the response was dropped.
    Stale,
}
