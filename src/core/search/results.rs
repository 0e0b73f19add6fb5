//! Listings Search View
//!
//! State of the full results page: text, category and sort drive a backend
//! search; the answer is grouped by category for display. Responses are
//! tagged with a generation and applied only if no newer request was issued
//! in the meantime.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::backend::SearchBackend;
use super::grouping::{group_by_category, CategoryGroup};
use super::models::{Listing, SearchParams, SortKey};
use super::route::Route;
use super::FetchOutcome;

#[derive(Debug)]
struct ResultsResponse {
    generation: u64,
    params: SearchParams,
    listings: Vec<Listing>,
}

/// What the page body should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsStatus {
    /// Nothing to show yet; a request is in flight.
    Loading,
    /// Listings are available (possibly stale while a newer request runs).
    Results,
    /// The backend answered with zero listings. A designed empty state.
    NoResults,
}

pub struct ListingsSearchView {
    backend: Arc<dyn SearchBackend>,
    params: SearchParams,
    generation: u64,
    results: Vec<Listing>,
    groups: Vec<CategoryGroup>,
    loading: bool,
    response_tx: mpsc::UnboundedSender<ResultsResponse>,
    response_rx: mpsc::UnboundedReceiver<ResultsResponse>,
}

impl ListingsSearchView {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            params: SearchParams::default(),
            generation: 0,
            results: Vec::new(),
            groups: Vec::new(),
            loading: false,
            response_tx,
            response_rx,
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn results(&self) -> &[Listing] {
        &self.results
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> ResultsStatus {
        if self.generation == 0 || (self.loading && self.results.is_empty()) {
            ResultsStatus::Loading
        } else if self.results.is_empty() {
            ResultsStatus::NoResults
        } else {
            ResultsStatus::Results
        }
    }

    /// Location reflecting the current text, category and sort.
    pub fn location(&self) -> Route {
        Route::SearchResults(self.params.clone())
    }

    /// `Showing results for "q" in category`, when any filter is active.
    pub fn caption(&self) -> Option<String> {
        let SearchParams { q, category, .. } = &self.params;
        match (q.is_empty(), category.is_empty()) {
            (true, true) => None,
            (false, true) => Some(format!("Showing results for \"{q}\"")),
            (true, false) => Some(format!("Showing results for {category}")),
            (false, false) => Some(format!("Showing results for \"{q}\" in {category}")),
        }
    }

    /// Way back to the unfiltered collection, offered by the empty state.
    pub fn empty_state_link(&self) -> Option<Route> {
        (self.status() == ResultsStatus::NoResults && self.params.is_filtered())
            .then(Route::all_listings)
    }

    /// Show the page for `params`. Issues a search unless nothing changed.
    ///
    /// Returns true if a request was issued.
    pub fn navigate(&mut self, params: SearchParams) -> bool {
        if self.generation > 0 && params == self.params {
            return false;
        }
        self.params = params;
        self.fetch();
        true
    }

    pub fn set_query(&mut self, q: &str) -> bool {
        let params = SearchParams {
            q: q.to_string(),
            ..self.params.clone()
        };
        self.navigate(params)
    }

    pub fn set_category(&mut self, category: &str) -> bool {
        let params = SearchParams {
            category: category.to_string(),
            ..self.params.clone()
        };
        self.navigate(params)
    }

    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        let params = self.params.clone().with_sort(sort);
        self.navigate(params)
    }

    /// Re-issue the current search unconditionally.
    pub fn refresh(&mut self) {
        self.fetch();
    }

    fn fetch(&mut self) {
        self.generation += 1;
        self.loading = true;

        let backend = self.backend.clone();
        let tx = self.response_tx.clone();
        let generation = self.generation;
        let params = self.params.clone();

        tokio::spawn(async move {
            let listings = match backend.search_listings(&params).await {
                Ok(listings) => listings,
                Err(e) => {
                    log::warn!("Listings search failed for {}: {e}", params.q);
                    Vec::new()
                }
            };
            let _ = tx.send(ResultsResponse {
                generation,
                params,
                listings,
            });
        });
    }

    /// Apply every response that has already arrived. Returns true on change.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(response) = self.response_rx.try_recv() {
            changed |= self.apply(response) == FetchOutcome::Applied;
        }
        changed
    }

    /// Wait for the next response and apply it.
    pub async fn next_response(&mut self) -> Option<FetchOutcome> {
        let response = self.response_rx.recv().await?;
        Some(self.apply(response))
    }

    fn apply(&mut self, response: ResultsResponse) -> FetchOutcome {
        if response.generation != self.generation {
            log::debug!(
                "Discarding stale listings for {:?} (generation {} < {})",
                response.params,
                response.generation,
                self.generation
            );
            return FetchOutcome::Stale;
        }
        self.groups = group_by_category(&response.listings);
        self.results = response.listings;
        self.loading = false;
        FetchOutcome::Applied
    }
}
