//! Health and metrics handlers.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::metrics::MetricsSnapshot;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub dataset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<String>,
}

/// GET /health - Basic health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /ready - Readiness check (dataset loaded)
pub async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let is_ready = state.dataset.is_loaded();

    let response = ReadyResponse {
        ready: is_ready,
        dataset: if is_ready {
            "ok".to_string()
        } else {
            format!("not loaded: {}", state.dataset.path().display())
        },
        boundaries: state.boundaries.as_ref().map(|b| b.url().to_string()),
    };

    let status = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response)).into_response()
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let mut body = state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();
    body.push_str(&state.metrics.snapshot().await.to_prometheus());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}

/// GET /api/metrics - JSON metrics snapshot
pub async fn api_metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures::sample_dataset;

    use crate::config::DashboardConfig;

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "ok");
    }

    #[tokio::test]
    async fn test_ready_when_loaded() {
        let state = Arc::new(AppState::with_dataset(sample_dataset(), DashboardConfig::default()).unwrap());
        let response = ready_handler(Extension(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_not_ready_before_load() {
        let mut config = DashboardConfig::default();
        config.dataset.path = "/nonexistent/fwi.nc".into();
        let state = Arc::new(AppState::new(config).unwrap());
        let response = ready_handler(Extension(state)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_metrics_without_recorder() {
        let state = Arc::new(AppState::with_dataset(sample_dataset(), DashboardConfig::default()).unwrap());
        let response = metrics_handler(Extension(state)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("fwi_uptime_seconds"));
    }
}
