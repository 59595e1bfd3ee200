//! FWI Dashboard Server
//!
//! Serves the Fire Weather Index explorer for one NetCDF dataset.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Extension, Router};
use clap::Parser;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use fwi_dashboard::config::{Args, DashboardConfig};
use fwi_dashboard::handlers;
use fwi_dashboard::state::AppState;

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = match runtime_builder.build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(run_server(args));
    if let Err(e) = result {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Prometheus metrics exporter initialized");
    info!("Starting FWI dashboard server");

    let config = DashboardConfig::resolve(&args)?;
    info!(
        dataset = %config.dataset.path.display(),
        variable = config.dataset.variable.as_deref().unwrap_or("auto"),
        boundaries = config.boundaries.url.as_deref().unwrap_or("none"),
        "Configuration loaded"
    );

    let state = Arc::new(AppState::new(config)?.with_prometheus(prometheus_handle));

    // Load the dataset before accepting requests; a failed load is fatal
    let loader = Arc::clone(&state);
    let dataset = tokio::task::spawn_blocking(move || loader.dataset.get())
        .await
        .context("Dataset load task failed")?
        .with_context(|| format!("Failed to load dataset {}", state.dataset.path().display()))?;

    info!(
        variable = dataset.variable(),
        dates = dataset.times().len(),
        nlat = dataset.lats().len(),
        nlon = dataset.lons().len(),
        "Dataset ready"
    );

    // Build router
    let app = Router::new()
        // Dashboard page
        .route("/", get(handlers::dashboard::dashboard_handler))
        // Images
        .route("/map.png", get(handlers::render::map_png_handler))
        .route("/histogram.png", get(handlers::render::histogram_png_handler))
        // JSON API
        .route("/api/dataset", get(handlers::api::dataset_handler))
        .route("/api/view", get(handlers::api::view_handler))
        .route("/api/summary", get(handlers::api::summary_handler))
        .route("/api/records", get(handlers::api::records_handler))
        .route("/api/histogram", get(handlers::api::histogram_handler))
        .route("/api/metrics", get(handlers::health::api_metrics_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
