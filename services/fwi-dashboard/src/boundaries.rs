//! GeoJSON boundary overlay.
//!
//! Boundary lines are fetched over HTTP and drawn underneath the map markers.
//! The overlay is decorative: any failure to fetch or parse it is logged and
//! the map renders without it.

use std::sync::Arc;
use std::time::Duration;

use renderer::Ring;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use crate::metrics::MetricsCollector;

#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("boundary request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("boundary request returned HTTP {0}")]
    Status(u16),

    #[error("invalid boundary GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// GeoJSON FeatureCollection, reduced to what the overlay needs.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

/// Positions are kept as `Vec<f64>` since they may carry an altitude.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Other,
}

fn to_ring(positions: Vec<Vec<f64>>) -> Option<Ring> {
    let ring: Ring = positions
        .into_iter()
        .filter_map(|p| match p.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        })
        .collect();
    (ring.len() >= 2).then_some(ring)
}

/// Extract every polygon ring (outer and holes) from a FeatureCollection.
///
/// Geometry types other than Polygon and MultiPolygon are ignored.
pub fn parse_boundaries(json: &str) -> Result<Vec<Ring>, BoundaryError> {
    let collection: FeatureCollection = serde_json::from_str(json)?;

    let mut rings = Vec::new();
    for geometry in collection.features.into_iter().filter_map(|f| f.geometry) {
        match geometry {
            Geometry::Polygon { coordinates } => {
                rings.extend(coordinates.into_iter().filter_map(to_ring));
            }
            Geometry::MultiPolygon { coordinates } => {
                rings.extend(coordinates.into_iter().flatten().filter_map(to_ring));
            }
            Geometry::Other => {}
        }
    }
    Ok(rings)
}

/// Fetches the overlay from a fixed URL and keeps the first successful
/// result.
pub struct BoundarySource {
    client: Client,
    url: String,
    cached: OnceCell<Arc<Vec<Ring>>>,
}

impl BoundarySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, BoundaryError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("fwi-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            cached: OnceCell::new(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One GET and parse, bypassing the cache.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<Vec<Ring>, BoundaryError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BoundaryError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        parse_boundaries(&body)
    }

    /// Cached rings, fetching on first use. Failures are not cached.
    pub async fn rings(&self) -> Result<Arc<Vec<Ring>>, BoundaryError> {
        self.cached
            .get_or_try_init(|| async {
                let rings = self.fetch().await?;
                info!(url = %self.url, rings = rings.len(), "Loaded boundary overlay");
                Ok::<_, BoundaryError>(Arc::new(rings))
            })
            .await
            .cloned()
    }

    /// Rings for drawing, or none if they cannot be obtained.
    pub async fn rings_or_empty(&self, metrics: &MetricsCollector) -> Arc<Vec<Ring>> {
        match self.rings().await {
            Ok(rings) => rings,
            Err(e) => {
                warn!(url = %self.url, error = %e, "Boundary overlay unavailable, rendering without it");
                metrics.record_boundary_failure();
                Arc::new(Vec::new())
            }
        }
    }
}

/// Overlay rings for an optional source.
pub async fn overlay_rings(source: Option<&BoundarySource>, metrics: &MetricsCollector) -> Arc<Vec<Ring>> {
    match source {
        Some(source) => source.rings_or_empty(metrics).await,
        None => {
            debug!("No boundary overlay configured");
            Arc::new(Vec::new())
        }
    }
}
