//! Quick-Match Fetcher
//!
//! Debounced, stale-guarded listing matches for the text being typed.
//!
//! Every edit bumps a generation counter. A fetch captures the generation it
//! was scheduled under and reports it back with its results; on arrival the
//! response is applied only if that generation is still current. Network
//! completion order therefore never decides what is displayed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::backend::SearchBackend;
use super::debounce::Debouncer;
use super::models::QuickResult;
use super::FetchOutcome;

/// A finished quick search, tagged with the edit that produced it.
#[derive(Debug)]
struct QuickMatchResponse {
    generation: u64,
    query: String,
    results: Vec<QuickResult>,
}

pub struct QuickMatchFetcher {
    backend: Arc<dyn SearchBackend>,
    debouncer: Debouncer,
    /// Text the current generation was scheduled for.
    query: String,
    generation: u64,
    results: Vec<QuickResult>,
    response_tx: mpsc::UnboundedSender<QuickMatchResponse>,
    response_rx: mpsc::UnboundedReceiver<QuickMatchResponse>,
}

impl QuickMatchFetcher {
    pub fn new(backend: Arc<dyn SearchBackend>, quiet_period: Duration) -> Self {
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            debouncer: Debouncer::new(quiet_period),
            query: String::new(),
            generation: 0,
            results: Vec::new(),
            response_tx,
            response_rx,
        }
    }

    /// Results for the latest applied text. Never merged across fetches.
    pub fn results(&self) -> &[QuickResult] {
        &self.results
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a fetch is still waiting for the quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Record a new input text.
    ///
    /// Empty (after trim) text clears the results immediately with no fetch.
    /// Anything else restarts the quiet period; only the trailing edit fetches.
    pub fn set_query(&mut self, text: &str) {
        self.generation += 1;
        self.query = text.to_string();
        self.debouncer.cancel();

        if text.trim().is_empty() {
            self.results.clear();
            return;
        }

        let backend = self.backend.clone();
        let tx = self.response_tx.clone();
        let generation = self.generation;
        let query = self.query.clone();

        self.debouncer.schedule(move || {
            // Detached from the timer: later edits cancel the timer, never the request.
            tokio::spawn(async move {
                let results = match backend.quick_search(&query).await {
                    Ok(results) => results,
                    Err(e) => {
                        log::warn!("Quick search for {query:?} failed: {e}");
                        Vec::new()
                    }
                };
                let _ = tx.send(QuickMatchResponse {
                    generation,
                    query,
                    results,
                });
            });
        });
    }

    /// Apply every response that has already arrived. Call from the UI tick.
    ///
    /// Returns true if the visible results changed.
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

    fn apply(&mut self, response: QuickMatchResponse) -> FetchOutcome {
        if response.generation != self.generation {
            log::debug!(
                "Discarding stale quick results for {:?} (generation {} < {})",
                response.query,
                response.generation,
                self.generation
            );
            return FetchOutcome::Stale;
        }
        self.results = response.results;
        FetchOutcome::Applied
    }
}
