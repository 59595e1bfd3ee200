//! Application metrics collection and reporting.

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;

/// Metrics collector for the dashboard.
#[derive(Debug)]
pub struct MetricsCollector {
    /// Request counts
    pub page_requests: AtomicU64,
    pub api_requests: AtomicU64,
    pub image_requests: AtomicU64,
    pub unavailable_dates: AtomicU64,
    pub boundary_failures: AtomicU64,

    /// Render stats
    pub renders_total: AtomicU64,
    pub render_errors: AtomicU64,

    map_times: RwLock<TimingStats>,
    histogram_times: RwLock<TimingStats>,

    start_time: Instant,
}

/// Which image a render produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    Map,
    Histogram,
}

impl RenderKind {
    pub fn label(&self) -> &'static str {
        match self {
            RenderKind::Map => "map",
            RenderKind::Histogram => "histogram",
        }
    }
}

#[derive(Debug, Default)]
struct TimingStats {
    count: u64,
    total_us: u64,
    min_us: u64,
    max_us: u64,
    last_us: u64,
}

impl TimingStats {
    fn record(&mut self, duration_us: u64) {
        self.count += 1;
        self.total_us += duration_us;
        self.last_us = duration_us;
        if self.min_us == 0 || duration_us < self.min_us {
            self.min_us = duration_us;
        }
        if duration_us > self.max_us {
            self.max_us = duration_us;
        }
    }

    fn summary(&self) -> TimingSummary {
        TimingSummary {
            count: self.count,
            avg_ms: if self.count == 0 {
                0.0
            } else {
                (self.total_us as f64 / self.count as f64) / 1000.0
            },
            min_ms: self.min_us as f64 / 1000.0,
            max_ms: self.max_us as f64 / 1000.0,
            last_ms: self.last_us as f64 / 1000.0,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            page_requests: AtomicU64::new(0),
            api_requests: AtomicU64::new(0),
            image_requests: AtomicU64::new(0),
            unavailable_dates: AtomicU64::new(0),
            boundary_failures: AtomicU64::new(0),
            renders_total: AtomicU64::new(0),
            render_errors: AtomicU64::new(0),
            map_times: RwLock::new(TimingStats::default()),
            histogram_times: RwLock::new(TimingStats::default()),
            start_time: Instant::now(),
        }
    }

    /// Record a dashboard page view
    pub fn record_page_request(&self) {
        self.page_requests.fetch_add(1, Ordering::Relaxed);
        counter!("fwi_requests_total", "endpoint" => "page").increment(1);
    }

    /// Record a JSON API request
    pub fn record_api_request(&self, endpoint: &'static str) {
        self.api_requests.fetch_add(1, Ordering::Relaxed);
        counter!("fwi_requests_total", "endpoint" => endpoint).increment(1);
    }

    /// Record a PNG request
    pub fn record_image_request(&self, kind: RenderKind) {
        self.image_requests.fetch_add(1, Ordering::Relaxed);
        counter!("fwi_requests_total", "endpoint" => kind.label()).increment(1);
    }

    /// Record a query for a date the dataset does not contain
    pub fn record_unavailable_date(&self) {
        self.unavailable_dates.fetch_add(1, Ordering::Relaxed);
        counter!("fwi_date_misses_total").increment(1);
    }

    /// Record a failed boundary overlay fetch
    pub fn record_boundary_failure(&self) {
        self.boundary_failures.fetch_add(1, Ordering::Relaxed);
        counter!("fwi_boundary_fetch_failures_total").increment(1);
    }

    /// Record a render operation
    pub async fn record_render(&self, kind: RenderKind, duration_us: u64, success: bool) {
        self.renders_total.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.render_errors.fetch_add(1, Ordering::Relaxed);
            counter!("fwi_render_errors_total", "kind" => kind.label()).increment(1);
        }
        counter!("fwi_renders_total", "kind" => kind.label()).increment(1);
        histogram!("fwi_render_duration_seconds", "kind" => kind.label()).record(duration_us as f64 / 1_000_000.0);

        let times = match kind {
            RenderKind::Map => &self.map_times,
            RenderKind::Histogram => &self.histogram_times,
        };
        times.write().await.record(duration_us);
    }

    /// Get current metrics snapshot
    pub async fn snapshot(&self) -> MetricsSnapshot {
        let map_times = self.map_times.read().await;
        let histogram_times = self.histogram_times.read().await;

        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            page_requests: self.page_requests.load(Ordering::Relaxed),
            api_requests: self.api_requests.load(Ordering::Relaxed),
            image_requests: self.image_requests.load(Ordering::Relaxed),
            unavailable_dates: self.unavailable_dates.load(Ordering::Relaxed),
            boundary_failures: self.boundary_failures.load(Ordering::Relaxed),
            renders_total: self.renders_total.load(Ordering::Relaxed),
            render_errors: self.render_errors.load(Ordering::Relaxed),
            map_render: map_times.summary(),
            histogram_render: histogram_times.summary(),
        }
    }
}

/// Serializable metrics snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub page_requests: u64,
    pub api_requests: u64,
    pub image_requests: u64,
    pub unavailable_dates: u64,
    pub boundary_failures: u64,
    pub renders_total: u64,
    pub render_errors: u64,
    pub map_render: TimingSummary,
    pub histogram_render: TimingSummary,
}

impl MetricsSnapshot {
    /// Uptime and render timing gauges in Prometheus text format.
    ///
    /// Counters are exported by the installed recorder and are not repeated.
    pub fn to_prometheus(&self) -> String {
        let mut out = String::new();
        out.push_str("# HELP fwi_uptime_seconds Seconds since the dashboard started\n");
        out.push_str("# TYPE fwi_uptime_seconds gauge\n");
        out.push_str(&format!("fwi_uptime_seconds {}\n", self.uptime_secs));
        out.push_str("# HELP fwi_render_avg_ms Mean render time per image kind\n");
        out.push_str("# TYPE fwi_render_avg_ms gauge\n");
        for (kind, timing) in [("map", &self.map_render), ("histogram", &self.histogram_render)] {
            out.push_str(&format!("fwi_render_avg_ms{{kind=\"{}\"}} {}\n", kind, timing.avg_ms));
        }
        out
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingSummary {
    pub count: u64,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub last_ms: f64,
}

/// Timer helper for measuring durations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_micros() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_timing() {
        let metrics = MetricsCollector::new();
        metrics.record_render(RenderKind::Map, 2_000, true).await;
        metrics.record_render(RenderKind::Map, 4_000, true).await;
        metrics.record_render(RenderKind::Histogram, 1_000, false).await;

        let snap = metrics.snapshot().await;
        assert_eq!(snap.renders_total, 3);
        assert_eq!(snap.render_errors, 1);
        assert_eq!(snap.map_render.count, 2);
        assert_eq!(snap.map_render.avg_ms, 3.0);
        assert_eq!(snap.map_render.min_ms, 2.0);
        assert_eq!(snap.map_render.max_ms, 4.0);
        assert_eq!(snap.histogram_render.last_ms, 1.0);

        let text = snap.to_prometheus();
        assert!(text.contains("fwi_render_avg_ms{kind=\"map\"} 3"));
        assert!(text.contains("# TYPE fwi_uptime_seconds gauge"));
    }

    #[tokio::test]
    async fn test_request_counters() {
        let metrics = MetricsCollector::new();
        metrics.record_page_request();
        metrics.record_api_request("summary");
        metrics.record_api_request("records");
        metrics.record_image_request(RenderKind::Map);
        metrics.record_unavailable_date();

        let snap = metrics.snapshot().await;
        assert_eq!(snap.page_requests, 1);
        assert_eq!(snap.api_requests, 2);
        assert_eq!(snap.image_requests, 1);
        assert_eq!(snap.unavailable_dates, 1);
    }
}
