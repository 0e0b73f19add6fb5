//! Insights Fetcher
//!
//! One-shot load of suggested terms, popular terms and popular categories
//! when the suggestion widget is first activated.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::backend::SearchBackend;
use super::models::InsightsSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightsState {
    /// Not activated yet.
    Idle,
    /// Fetch in flight.
    Loading,
    /// Fetch finished (successfully or not). Never refreshed.
    Ready,
}

pub struct InsightsFetcher {
    backend: Arc<dyn SearchBackend>,
    state: InsightsState,
    /// `None` after a failed fetch; read through [`Self::snapshot`].
    snapshot: Option<InsightsSnapshot>,
    empty: InsightsSnapshot,
    data_tx: mpsc::UnboundedSender<Option<InsightsSnapshot>>,
    data_rx: mpsc::UnboundedReceiver<Option<InsightsSnapshot>>,
}

impl InsightsFetcher {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            state: InsightsState::Idle,
            snapshot: None,
            empty: InsightsSnapshot::default(),
            data_tx,
            data_rx,
        }
    }

    pub fn state(&self) -> InsightsState {
        self.state
    }

    /// Start the fetch on first activation; later calls do nothing.
    pub fn activate(&mut self) {
        if self.state != InsightsState::Idle {
            return;
        }
        self.state = InsightsState::Loading;

        let backend = self.backend.clone();
        let tx = self.data_tx.clone();
        tokio::spawn(async move {
            let snapshot = match backend.insights().await {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    log::warn!("Failed to load search insights: {e}");
                    None
                }
            };
            let _ = tx.send(snapshot);
        });
    }

    /// Apply the fetch result if it has arrived. Returns true on arrival.
    pub fn poll(&mut self) -> bool {
        match self.data_rx.try_recv() {
            Ok(snapshot) => {
                self.store(snapshot);
                true
            }
            Err(_) => false,
        }
    }

    /// Wait for the fetch to finish. Returns immediately unless loading.
    pub async fn wait_ready(&mut self) {
        if self.state != InsightsState::Loading {
            return;
        }
        if let Some(snapshot) = self.data_rx.recv().await {
            self.store(snapshot);
        }
    }

    /// Current snapshot; an absent or failed fetch reads as all-empty.
    pub fn snapshot(&self) -> &InsightsSnapshot {
        self.snapshot.as_ref().unwrap_or(&self.empty)
    }

    fn store(&mut self, snapshot: Option<InsightsSnapshot>) {
        if snapshot.as_ref().is_some_and(InsightsSnapshot::is_empty) {
            log::debug!("Search insights are empty; only quick matches will be suggested");
        }
        self.snapshot = snapshot;
        self.state = InsightsState::Ready;
    }
}
