//! Application state for the dashboard.

use std::sync::Arc;

use anyhow::{Context, Result};
use fwi_common::{FwiError, FwiResult, GriddedDataset};
use grid_processor::DatasetHandle;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use crate::boundaries::BoundarySource;
use crate::config::DashboardConfig;
use crate::metrics::MetricsCollector;

/// Shared application state.
pub struct AppState {
    /// Lazily loaded, process-wide dataset.
    pub dataset: DatasetHandle,

    /// Optional overlay source; `None` when no URL is configured.
    pub boundaries: Option<BoundarySource>,

    pub config: DashboardConfig,

    pub metrics: Arc<MetricsCollector>,

    /// Recorder handle for the `/metrics` endpoint.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from configuration. The dataset is not read yet.
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let dataset = DatasetHandle::new(config.dataset.path.clone(), config.dataset.spec());
        Self::with_handle(dataset, config)
    }

    /// Build state around an already loaded dataset.
    pub fn with_dataset(dataset: GriddedDataset, config: DashboardConfig) -> Result<Self> {
        Self::with_handle(DatasetHandle::from_dataset(dataset), config)
    }

    fn with_handle(dataset: DatasetHandle, config: DashboardConfig) -> Result<Self> {
        let boundaries = match &config.boundaries.url {
            Some(url) => {
                info!(url = %url, "Boundary overlay enabled");
                Some(BoundarySource::new(url.clone(), config.boundaries.timeout()).context("Failed to build HTTP client")?)
            }
            None => None,
        };

        Ok(Self {
            dataset,
            boundaries,
            config,
            metrics: Arc::new(MetricsCollector::new()),
            prometheus: None,
        })
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// The loaded dataset, or `ServiceUnavailable` before a successful load.
    pub fn loaded_dataset(&self) -> FwiResult<Arc<GriddedDataset>> {
        self.dataset
            .loaded()
            .ok_or_else(|| FwiError::ServiceUnavailable("dataset not loaded".to_string()))
    }
}
