use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::search::{
    category_source, CategorySource, HttpSearchBackend, QueryLogger, SearchBackend, SearchError,
};

use super::events::AppEvent;

/// Centralized handle to all backend services.
///
/// Created once at startup, then passed by ref to views that need
/// backend access. Every field is cheap to clone.
pub struct Services {
    pub backend: Arc<dyn SearchBackend>,
    pub logger: QueryLogger,
    pub categories: Arc<dyn CategorySource>,
    /// Quick-search quiet period.
    pub debounce: Duration,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    /// Initialize all services from config.
    ///
    /// Fails only on an unusable backend URL.
    pub fn init(
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self, SearchError> {
        let backend: Arc<dyn SearchBackend> = Arc::new(HttpSearchBackend::new(
            &config.backend.base_url,
            config.request_timeout(),
        )?);
        log::info!("Search backend at {}", config.backend.base_url);

        Ok(Self::with_backend(backend, config, event_tx))
    }

    /// Wire services around an existing backend.
    pub fn with_backend(
        backend: Arc<dyn SearchBackend>,
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let logger = QueryLogger::new(backend.clone(), &config.client.user_agent);
        log::info!("Classified client as {}", logger.device_type().as_str());

        let categories = category_source(config.search.category_source, backend.clone());
        log::info!("Category source: {}", categories.name());

        Self {
            backend,
            logger,
            categories,
            debounce: config.debounce(),
            event_tx,
        }
    }

    /// Load the category index in the background; delivered as
    /// [`AppEvent::CategoriesLoaded`].
    pub fn load_categories(&self) {
        let source = self.categories.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let index = source.load().await;
            log::debug!(
                "Loaded {} categories ({} popular)",
                index.categories.len(),
                index.popular.len()
            );
            let _ = tx.send(AppEvent::CategoriesLoaded(index));
        });
    }
}
