//! PNG map and histogram handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::header,
    response::{IntoResponse, Response},
};
use fwi_common::{FwiError, FwiResult};
use renderer::{render_histogram, render_scatter_map};
use tracing::{debug, instrument};

use super::{error_response, view_for, DateParams};
use crate::boundaries::overlay_rings;
use crate::metrics::{RenderKind, Timer};
use crate::state::AppState;
use crate::view::{DashboardView, DayView};

fn png_response(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "max-age=300"),
        ],
        bytes,
    )
        .into_response()
}

fn available(view: DashboardView) -> FwiResult<DayView> {
    match view {
        DashboardView::Available(day) => Ok(day),
        DashboardView::Unavailable { date, .. } => Err(FwiError::DataNotAvailable(date)),
    }
}

/// Run a CPU-bound render off the async workers and record its timing.
async fn timed_render<F>(state: &AppState, kind: RenderKind, render: F) -> FwiResult<Vec<u8>>
where
    F: FnOnce() -> FwiResult<Vec<u8>> + Send + 'static,
{
    let timer = Timer::start();
    let result = tokio::task::spawn_blocking(render)
        .await
        .map_err(|e| FwiError::InternalError(format!("render task failed: {}", e)))
        .and_then(|r| r);

    state
        .metrics
        .record_render(kind, timer.elapsed_us(), result.is_ok())
        .await;
    debug!(kind = kind.label(), elapsed_ms = timer.elapsed_ms(), ok = result.is_ok(), "Rendered image");
    result
}

/// GET /map.png - Colour-scaled FWI map with the boundary overlay
#[instrument(skip_all, fields(date = ?params.date))]
pub async fn map_png_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> Response {
    state.metrics.record_image_request(RenderKind::Map);

    let day = match view_for(&state, &params).and_then(available) {
        Ok(day) => day,
        Err(e) => return error_response(&e),
    };

    let rings = overlay_rings(state.boundaries.as_ref(), &state.metrics).await;
    let style = state.config.map.style();

    let result = timed_render(&state, RenderKind::Map, move || {
        let points = day.map_points();
        let map = day.scatter_map(&points, &rings);
        Ok(render_scatter_map(&map, &style)?)
    })
    .await;

    match result {
        Ok(bytes) => png_response(bytes),
        Err(e) => error_response(&e),
    }
}

/// GET /histogram.png - Distribution of the day's FWI values
#[instrument(skip_all, fields(date = ?params.date))]
pub async fn histogram_png_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> Response {
    state.metrics.record_image_request(RenderKind::Histogram);

    let day = match view_for(&state, &params).and_then(available) {
        Ok(day) => day,
        Err(e) => return error_response(&e),
    };

    let counts = day.histogram.map(|h| h.counts).unwrap_or_default();
    let style = state.config.histogram.style();

    match timed_render(&state, RenderKind::Histogram, move || Ok(render_histogram(&counts, &style)?)).await {
        Ok(bytes) => png_response(bytes),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use renderer::{is_png, png_dimensions};
    use test_utils::fixtures::sample_dataset;

    use crate::config::DashboardConfig;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::with_dataset(sample_dataset(), DashboardConfig::default()).unwrap())
    }

    async fn body(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn test_map_png() {
        let state = state();
        let response = map_png_handler(Extension(state.clone()), Query(DateParams::default())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

        let png = body(response).await;
        assert!(is_png(&png));
        assert_eq!(png_dimensions(&png), Some((800, 600)));
        assert_eq!(state.metrics.snapshot().await.map_render.count, 1);
    }

    #[tokio::test]
    async fn test_histogram_png_for_all_missing_day() {
        let state = state();
        let response = histogram_png_handler(
            Extension(state),
            Query(DateParams {
                date: Some("2016-07-03".into()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(png_dimensions(&body(response).await), Some((800, 400)));
    }

    #[tokio::test]
    async fn test_map_png_unavailable_date() {
        let response = map_png_handler(
            Extension(state()),
            Query(DateParams {
                date: Some("2014-12-31".into()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
