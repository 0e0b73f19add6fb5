//! Search Models
//!
//! Wire and view data structures shared by the search components: quick
//! matches, insights, listings, query log entries and results-page params.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Quick Matches
// ============================================================================

/// A compact listing match returned while the user is still typing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickResult {
    pub id: i64,
    pub title: String,
    pub price: f64,
}

// ============================================================================
// Insights
// ============================================================================

/// A historical search term with the number of times it was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularSearch {
    pub term: String,
    pub count: u64,
}

/// Aggregate suggestion data fetched once per widget mount.
///
/// Every field defaults to empty so a partial body (older backends omit
/// `popular_categories`) decodes to the same shape as a complete one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsSnapshot {
    #[serde(default)]
    pub popular_searches: Vec<PopularSearch>,
    #[serde(default)]
    pub suggested_searches: Vec<String>,
    #[serde(default)]
    pub popular_categories: Vec<String>,
}

impl InsightsSnapshot {
    /// True when no section would be rendered from this snapshot.
    pub fn is_empty(&self) -> bool {
        self.popular_searches.is_empty()
            && self.suggested_searches.is_empty()
            && self.popular_categories.is_empty()
    }
}

// ============================================================================
// Listings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingImage {
    pub id: i64,
    pub image_url: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// A marketplace listing as served by the search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub images: Vec<ListingImage>,
}

impl Listing {
    /// The image flagged primary, else the first image, else `None`.
    pub fn primary_image(&self) -> Option<&ListingImage> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
    }

    /// Category with empty values folded into `None`.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// `{ "results": [...] }` envelope used by the listing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingsPage {
    #[serde(default)]
    pub results: Vec<Listing>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesPayload {
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopularCategoriesPayload {
    #[serde(default)]
    pub popular_categories: Vec<String>,
}

/// Display a price the way listing cards show it: `$120` or `$12.50`.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${price:.0}")
    } else {
        format!("${price:.2}")
    }
}

// ============================================================================
// Query Log
// ============================================================================

/// Coarse device category attached to every logged search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Mobile,
    Desktop,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

/// One completed search intent, written once and never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query_text: String,
    pub device_type: DeviceType,
}

// ============================================================================
// Results Page Parameters
// ============================================================================

/// Server-side ordering of the full results page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    Newest,
}

impl SortKey {
    /// All variants in selector order.
    pub const ALL: [SortKey; 4] = [
        Self::Relevance,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Newest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
            Self::Newest => "newest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::Newest => "Newest",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Relevance => Self::PriceLow,
            Self::PriceLow => Self::PriceHigh,
            Self::PriceHigh => Self::Newest,
            Self::Newest => Self::Relevance,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Relevance => Self::Newest,
            Self::PriceLow => Self::Relevance,
            Self::PriceHigh => Self::PriceLow,
            Self::Newest => Self::PriceHigh,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unknown keys fall back to relevance, matching the backend default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "price_low" => Self::PriceLow,
            "price_high" => Self::PriceHigh,
            "newest" => Self::Newest,
            _ => Self::Relevance,
        })
    }
}

/// Free text, category filter and sort key of the full results page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchParams {
    pub q: String,
    pub category: String,
    pub sort: SortKey,
}

impl SearchParams {
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// True when either a text query or a category filter is active.
    pub fn is_filtered(&self) -> bool {
        !self.q.is_empty() || !self.category.is_empty()
    }

    /// Query pairs sent to the full search endpoint; empty filters are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if !self.q.is_empty() {
            pairs.push(("q", self.q.clone()));
        }
        if !self.category.is_empty() {
            pairs.push(("category", self.category.clone()));
        }
        pairs.push(("sort", self.sort.as_str().to_string()));
        pairs
    }
}
