//! HTTP request handlers.

pub mod api;
pub mod dashboard;
pub mod health;
pub mod render;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use fwi_common::{DateQuery, FwiError, FwiResult, GriddedDataset};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;
use crate::view::{build_view, default_query, DashboardView};

/// `?date=` parameter shared by every per-date endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DateParams {
    /// Calendar date or timestamp; the first dataset date when absent.
    pub date: Option<String>,
}

impl DateParams {
    /// Parse the requested date, falling back to the first dataset date.
    pub fn resolve(&self, dataset: &GriddedDataset) -> FwiResult<DateQuery> {
        match self.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(date) => Ok(DateQuery::parse(date)?),
            None => default_query(dataset).ok_or_else(|| FwiError::DataNotAvailable("dataset has no dates".to_string())),
        }
    }

    /// The raw value for query strings, if any.
    pub fn as_query_string(&self) -> String {
        match &self.date {
            Some(date) => format!("?date={}", urlencoding::encode(date)),
            None => String::new(),
        }
    }
}

/// Resolve the request's date and build its view.
pub(crate) fn view_for(state: &AppState, params: &DateParams) -> FwiResult<DashboardView> {
    let dataset = state.loaded_dataset()?;
    let query = params.resolve(&dataset)?;
    let view = build_view(&dataset, &query, state.config.map.margin_deg)?;
    if matches!(view, DashboardView::Unavailable { .. }) {
        state.metrics.record_unavailable_date();
    }
    Ok(view)
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// JSON error body with the status code the error maps to.
pub fn error_response(err: &FwiError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        warn!(error = %err, "Request failed");
    }
    let body = ErrorBody {
        error: err.error_code(),
        message: err.to_string(),
    };
    let json = serde_json::to_string(&body).unwrap_or_default();
    (status, [(header::CONTENT_TYPE, "application/json")], json).into_response()
}
