//! HTTP Search Backend
//!
//! reqwest implementation of [`SearchBackend`] against the marketplace API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::backend::SearchBackend;
use super::error::{Result, SearchError};
use super::models::{
    CategoriesPayload, InsightsSnapshot, Listing, ListingsPage, PopularCategoriesPayload,
    QueryLogEntry, QuickResult, SearchParams,
};

// ============================================================================
// Endpoints
// ============================================================================

pub const PATH_INSIGHTS: &str = "/search/insights";
pub const PATH_QUICK: &str = "/search/quick";
pub const PATH_LOG: &str = "/search/log";
pub const PATH_LISTINGS_SEARCH: &str = "/search/listings";
pub const PATH_CATEGORIES: &str = "/search/categories";
pub const PATH_POPULAR_CATEGORIES: &str = "/search/popular-categories";
pub const PATH_ALL_LISTINGS: &str = "/listings/";

// ============================================================================
// Client
// ============================================================================

/// Search backend reached over HTTP.
#[derive(Clone)]
pub struct HttpSearchBackend {
    client: Client,
    base_url: String,
}

impl HttpSearchBackend {
    /// Build a backend for `base_url`, with an optional per-request timeout.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(SearchError::Unavailable(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                path: path.to_string(),
                status,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn insights(&self) -> Result<InsightsSnapshot> {
        self.get_json(PATH_INSIGHTS, &[]).await
    }

    async fn quick_search(&self, query: &str) -> Result<Vec<QuickResult>> {
        self.get_json(PATH_QUICK, &[("q", query.to_string())]).await
    }

    async fn log_search(&self, entry: QueryLogEntry) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint(PATH_LOG))
            .json(&entry)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                path: PATH_LOG.to_string(),
                status,
            });
        }
        Ok(())
    }

    async fn search_listings(&self, params: &SearchParams) -> Result<Vec<Listing>> {
        let page: ListingsPage = self
            .get_json(PATH_LISTINGS_SEARCH, &params.to_query_pairs())
            .await?;
        Ok(page.results)
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let payload: CategoriesPayload = self.get_json(PATH_CATEGORIES, &[]).await?;
        Ok(payload.categories)
    }

    async fn popular_categories(&self) -> Result<Vec<String>> {
        let payload: PopularCategoriesPayload =
            self.get_json(PATH_POPULAR_CATEGORIES, &[]).await?;
        Ok(payload.popular_categories)
    }

    async fn all_listings(&self) -> Result<Vec<Listing>> {
        let page: ListingsPage = self.get_json(PATH_ALL_LISTINGS, &[]).await?;
        Ok(page.results)
    }
}
