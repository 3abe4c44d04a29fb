//! Shared application state.

use crate::config::ConfigV1;
use crate::druid::DruidQuerier;
use crate::metrics::Publisher;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; everything inside is read-only.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Renders the task count gauge for each scrape.
    pub publisher: Arc<Publisher>,
}

impl AppState {
    /// Wires a Druid-backed publisher from the configuration.
    pub fn from_config(config: Arc<ConfigV1>) -> prometheus::Result<Self> {
        let querier = Arc::new(DruidQuerier::new(&config));
        let publisher = Arc::new(Publisher::new(querier)?);
        Ok(Self { config, publisher })
    }
}
