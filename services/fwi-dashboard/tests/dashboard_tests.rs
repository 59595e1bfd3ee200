//! End-to-end tests of the dashboard handlers: NetCDF file to JSON and PNG,
//! with and without a reachable boundary overlay.

use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{Extension, Query},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use fwi_dashboard::config::DashboardConfig;
use fwi_dashboard::handlers::{self, DateParams};
use fwi_dashboard::state::AppState;
use renderer::{is_png, png_dimensions};
use test_utils::fixtures::sample_dataset;
use test_utils::{write_fwi_netcdf, NcFixture};

const BOUNDARY_GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"name": "box"},
         "geometry": {"type": "Polygon", "coordinates": [
            [[-124.0, 50.0], [-121.0, 50.0], [-121.0, 51.0], [-124.0, 51.0], [-124.0, 50.0]]
         ]}}
    ]
}"#;

/// Serve `body` on an ephemeral local port and return its URL.
async fn serve_geojson(body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/boundaries.geojson", get(move || async move { body }));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/boundaries.geojson", addr)
}

fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/boundaries.geojson", addr)
}

fn state_with_boundaries(url: Option<String>) -> Arc<AppState> {
    let mut config = DashboardConfig::default();
    config.boundaries.url = url;
    config.boundaries.timeout_secs = 2;
    Arc::new(AppState::with_dataset(sample_dataset(), config).unwrap())
}

fn first_day() -> Query<DateParams> {
    Query(DateParams {
        date: Some("2016-07-01".to_string()),
    })
}

async fn bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

#[tokio::test]
async fn test_netcdf_file_to_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fwi.nc");
    write_fwi_netcdf(&path, &NcFixture::two_days()).unwrap();

    let mut config = DashboardConfig::default();
    config.dataset.path = path;
    let state = Arc::new(AppState::new(config).unwrap());

    // Not loaded yet: endpoints report the service as unavailable
    let response = handlers::api::summary_handler(Extension(state.clone()), first_day()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    state.dataset.get().unwrap();

    let response = handlers::api::summary_handler(Extension(state.clone()), first_day()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&bytes(response).await).unwrap();
    assert_eq!(body["date"], "2016-07-01");
    assert_eq!(body["summary"]["count"], 5);
    assert_eq!(body["summary"]["mean"], 3.0);
    assert_eq!(body["summary"]["max"], 5.0);
    assert_eq!(body["summary"]["min"], 1.0);
}

#[tokio::test]
async fn test_page_renders_for_first_date_by_default() {
    let state = state_with_boundaries(None);
    let response = handlers::dashboard::dashboard_handler(Extension(state.clone()), Query(DateParams::default())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(bytes(response).await).unwrap();
    assert!(html.contains("FWI Summary for 2016-07-01"));
    assert_eq!(state.metrics.snapshot().await.page_requests, 1);
}

#[tokio::test]
async fn test_map_with_boundary_overlay() {
    let url = serve_geojson(BOUNDARY_GEOJSON).await;
    let with_overlay = state_with_boundaries(Some(url));
    let without_overlay = state_with_boundaries(None);

    let rings = with_overlay.boundaries.as_ref().unwrap().rings().await.unwrap();
    assert_eq!(rings.len(), 1);
    assert_eq!(rings[0].len(), 5);

    let a = handlers::render::map_png_handler(Extension(with_overlay.clone()), first_day()).await;
    let b = handlers::render::map_png_handler(Extension(without_overlay), first_day()).await;
    assert_eq!(a.status(), StatusCode::OK);
    assert_eq!(b.status(), StatusCode::OK);

    let a = bytes(a).await;
    let b = bytes(b).await;
    assert!(is_png(&a));
    assert_ne!(a, b, "overlay should change the rendered map");
    assert_eq!(with_overlay.metrics.snapshot().await.boundary_failures, 0);
}

#[tokio::test]
async fn test_map_renders_when_boundary_fetch_fails() {
    let failing = state_with_boundaries(Some(unreachable_url()));
    let plain = state_with_boundaries(None);

    let a = handlers::render::map_png_handler(Extension(failing.clone()), first_day()).await;
    let b = handlers::render::map_png_handler(Extension(plain), first_day()).await;
    assert_eq!(a.status(), StatusCode::OK);

    let a = bytes(a).await;
    assert_eq!(png_dimensions(&a), Some((800, 600)));
    assert_eq!(a, bytes(b).await);
    assert_eq!(failing.metrics.snapshot().await.boundary_failures, 1);
}

#[tokio::test]
async fn test_offset_query_selects_utc_date() {
    let state = state_with_boundaries(None);
    let response = handlers::api::summary_handler(
        Extension(state),
        Query(DateParams {
            date: Some("2016-07-01T20:00:00-05:00".to_string()),
        }),
    )
    .await;
    let body: serde_json::Value = serde_json::from_slice(&bytes(response).await).unwrap();
    assert_eq!(body["date"], "2016-07-02");
}
