//! JSON API handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use fwi_common::{FwiError, FwiResult};
use grid_processor::{ColorDomain, FwiRecord, Histogram, SummaryStats};
use serde::Serialize;

use super::{error_response, view_for, DateParams};
use crate::state::AppState;
use crate::view::{DashboardView, DayView};

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub date: String,
    pub summary: Option<SummaryStats>,
    pub lines: Option<[String; 3]>,
    pub color_domain: Option<ColorDomain>,
}

#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub date: String,
    pub count: usize,
    pub records: Vec<FwiRecord>,
}

#[derive(Debug, Serialize)]
pub struct HistogramResponse {
    pub date: String,
    pub histogram: Option<Histogram>,
}

/// The view of an available date; a missing date becomes a 404.
fn day_view(state: &AppState, params: &DateParams) -> FwiResult<DayView> {
    match view_for(state, params)? {
        DashboardView::Available(day) => Ok(day),
        DashboardView::Unavailable { date, .. } => Err(FwiError::DataNotAvailable(date)),
    }
}

/// GET /api/dataset - Variable, grid size and available dates
pub async fn dataset_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    state.metrics.record_api_request("dataset");
    match state.loaded_dataset() {
        Ok(dataset) => Json(dataset.info()).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /api/view - Everything shown for a date, including the unavailable state
pub async fn view_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> Response {
    state.metrics.record_api_request("view");
    match view_for(&state, &params) {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /api/summary - Mean, max and min FWI for a date
pub async fn summary_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> Response {
    state.metrics.record_api_request("summary");
    match day_view(&state, &params) {
        Ok(day) => Json(SummaryResponse {
            lines: day.summary.map(|s| s.lines()),
            summary: day.summary,
            color_domain: day.color_domain,
            date: day.date,
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /api/records - Flattened (latitude, longitude, fwi_value) rows
pub async fn records_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> Response {
    state.metrics.record_api_request("records");
    match day_view(&state, &params) {
        Ok(day) => Json(RecordsResponse {
            count: day.records.len(),
            records: day.records,
            date: day.date,
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /api/histogram - 30-bin distribution of the day's values
pub async fn histogram_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> Response {
    state.metrics.record_api_request("histogram");
    match day_view(&state, &params) {
        Ok(day) => Json(HistogramResponse {
            date: day.date,
            histogram: day.histogram,
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}
