//! Query Logger
//!
//! Fire-and-forget submission of completed search intents. The log feeds the
//! backend's popularity rankings; nothing here is ever read back.

use std::sync::Arc;

use super::backend::SearchBackend;
use super::device::classify_device;
use super::models::{DeviceType, QueryLogEntry};

#[derive(Clone)]
pub struct QueryLogger {
    backend: Arc<dyn SearchBackend>,
    device_type: DeviceType,
}

impl QueryLogger {
    /// Logger tagging entries with the device category of `client_signal`.
    pub fn new(backend: Arc<dyn SearchBackend>, client_signal: &str) -> Self {
        Self {
            backend,
            device_type: classify_device(client_signal),
        }
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Issue one log write for `term` and return without waiting for it.
    ///
    /// The write is handed to the runtime before this returns, so callers may
    /// navigate immediately. Failures are consumed in the spawned task. Blank
    /// terms are not sent.
    pub fn log(&self, term: &str) {
        if term.trim().is_empty() {
            log::debug!("Skipping query log for blank term");
            return;
        }

        let entry = QueryLogEntry {
            query_text: term.to_string(),
            device_type: self.device_type,
        };
        let backend = self.backend.clone();

        tokio::spawn(async move {
            let query_text = entry.query_text.clone();
            if let Err(e) = backend.log_search(entry).await {
                log::debug!("Query log write for {query_text:?} dropped: {e}");
            }
        });
    }
}
