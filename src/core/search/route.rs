//! Navigable locations produced by the search widget and results page.

use url::{form_urlencoded, Url};

use super::models::{SearchParams, SortKey};

const SEARCH_RESULTS_PATH: &str = "/search-results";
const LISTINGS_PATH: &str = "/listings";

/// Where a search interaction navigates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A single listing's detail page.
    Listing(i64),
    /// The full results page for free text and/or category.
    SearchResults(SearchParams),
    /// The listing collection, optionally filtered by category.
    Listings(SearchParams),
}

impl Route {
    pub fn search(q: impl Into<String>) -> Self {
        Self::SearchResults(SearchParams::query(q))
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self::SearchResults(SearchParams::category(category))
    }

    /// The unfiltered listing collection.
    pub fn all_listings() -> Self {
        Self::Listings(SearchParams::default())
    }

    /// Results-page params, if this route shows a results page.
    pub fn params(&self) -> Option<&SearchParams> {
        match self {
            Self::Listing(_) => None,
            Self::SearchResults(params) | Self::Listings(params) => Some(params),
        }
    }

    /// Render as a path with an encoded query string.
    pub fn to_path(&self) -> String {
        match self {
            Self::Listing(id) => format!("{LISTINGS_PATH}/{id}"),
            Self::SearchResults(params) => with_query(SEARCH_RESULTS_PATH, params),
            Self::Listings(params) => with_query(LISTINGS_PATH, params),
        }
    }

    /// Parse a path produced by [`Self::to_path`] (or typed by hand).
    pub fn parse(path: &str) -> Option<Self> {
        let base = Url::parse("http://listing-search.local").ok()?;
        let url = base.join(path).ok()?;

        let mut params = SearchParams::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "q" => params.q = value.into_owned(),
                "category" => params.category = value.into_owned(),
                "sort" => params.sort = value.parse().unwrap_or_default(),
                _ => {}
            }
        }

        let trimmed = url.path().trim_end_matches('/');
        match trimmed {
            SEARCH_RESULTS_PATH => Some(Self::SearchResults(params)),
            LISTINGS_PATH => Some(Self::Listings(params)),
            _ => trimmed
                .strip_prefix("/listings/")
                .and_then(|id| id.parse().ok())
                .map(Self::Listing),
        }
    }
}

fn with_query(path: &str, params: &SearchParams) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if !params.q.is_empty() {
        serializer.append_pair("q", &params.q);
    }
    if !params.category.is_empty() {
        serializer.append_pair("category", &params.category);
    }
    if params.sort != SortKey::default() {
        serializer.append_pair("sort", params.sort.as_str());
    }

    let query = serializer.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
