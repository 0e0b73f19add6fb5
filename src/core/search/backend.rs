//! Search Backend Contract
//!
//! Every remote call the search subsystem makes, behind one trait so the
//! fetchers can be driven by the reqwest client in production and by
//! scripted fakes in tests.

use async_trait::async_trait;

use super::error::Result;
use super::models::{InsightsSnapshot, Listing, QueryLogEntry, QuickResult, SearchParams};

/// Remote search service consumed by the fetchers, logger and category sources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Aggregate suggestion data (suggested, popular terms and categories).
    async fn insights(&self) -> Result<InsightsSnapshot>;

    /// Small, fast listing matches for in-progress text.
    async fn quick_search(&self, query: &str) -> Result<Vec<QuickResult>>;

    /// Record one search intent. The response body carries no meaning.
    async fn log_search(&self, entry: QueryLogEntry) -> Result<()>;

    /// Full results page for text, category and sort.
    async fn search_listings(&self, params: &SearchParams) -> Result<Vec<Listing>>;

    /// Curated list of every category.
    async fn categories(&self) -> Result<Vec<String>>;

    /// Curated "popular" subset of categories.
    async fn popular_categories(&self) -> Result<Vec<String>>;

    /// The unfiltered listing collection.
    async fn all_listings(&self) -> Result<Vec<Listing>>;
}
