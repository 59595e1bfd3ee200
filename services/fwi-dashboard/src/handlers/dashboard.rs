//! The HTML dashboard page.

use std::fmt::Write;
use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::{Html, IntoResponse, Response},
};
use fwi_common::{display_time, GriddedDataset};
use tracing::instrument;

use super::{error_response, view_for, DateParams};
use crate::state::AppState;
use crate::view::{DashboardView, DayView};

const PAGE_TITLE: &str = "Fire Weather Index (FWI) Explorer";

const STYLE: &str = r#"
    body { font-family: sans-serif; margin: 0; display: flex; color: #262730; }
    aside { width: 240px; padding: 1.5rem; background: #f0f2f6; min-height: 100vh; }
    main { flex: 1; padding: 1.5rem 2rem; }
    figure { margin: 1rem 0; }
    figcaption { font-weight: bold; margin-bottom: 0.5rem; }
    .axis { font-size: 0.85rem; color: #555; }
    .error { color: #b00020; }
"#;

/// GET / - Dashboard for the selected (or first) date
#[instrument(skip_all, fields(date = ?params.date))]
pub async fn dashboard_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<DateParams>,
) -> Response {
    state.metrics.record_page_request();

    let dataset = match state.loaded_dataset() {
        Ok(dataset) => dataset,
        Err(e) => return error_response(&e),
    };
    match view_for(&state, &params) {
        Ok(view) => Html(render_page(&dataset, &view)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Minimal escaping for text and attribute values.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `YYYY-MM-DD` part of a date label, as used by `<input type="date">`.
fn input_date(label: &str) -> &str {
    label.get(..10).unwrap_or(label)
}

/// Render the whole page for a view.
pub fn render_page(dataset: &GriddedDataset, view: &DashboardView) -> String {
    let selected = match view {
        DashboardView::Available(day) => day.date.as_str(),
        DashboardView::Unavailable { date, .. } => date.as_str(),
    };
    let first = dataset.times().first().map(display_time).unwrap_or_default();
    let last = dataset.times().last().map(display_time).unwrap_or_default();

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<aside>
<h2>Options</h2>
<form method="get" action="/">
<label for="date">Select Date</label><br>
<input type="date" id="date" name="date" value="{value}" min="{min}" max="{max}">
<button type="submit">Show</button>
</form>
</aside>
<main>
<h1>{title}</h1>
<h2>Analysis</h2>
"#,
        title = PAGE_TITLE,
        style = STYLE,
        value = escape_html(input_date(selected)),
        min = escape_html(input_date(&first)),
        max = escape_html(input_date(&last)),
    );

    match view {
        DashboardView::Available(day) => render_day(&mut html, day),
        DashboardView::Unavailable { message, .. } => {
            let _ = writeln!(html, r#"<p class="error">{}</p>"#, escape_html(message));
        }
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_day(html: &mut String, day: &DayView) {
    let date = escape_html(&day.date);
    let query = DateParams {
        date: Some(day.date.clone()),
    }
    .as_query_string();

    let _ = writeln!(html, "<h3>FWI Summary for {}</h3>", date);
    match &day.summary {
        Some(summary) => {
            html.push_str("<ul>\n");
            for line in summary.lines() {
                let _ = writeln!(html, "<li>{}</li>", escape_html(&line));
            }
            html.push_str("</ul>\n");
        }
        None => html.push_str("<p>No FWI values for this date.</p>\n"),
    }

    let _ = write!(
        html,
        r#"<figure>
<figcaption>FWI Map</figcaption>
<img src="/map.png{query}" alt="FWI map for {date}">
"#
    );
    if let Some(domain) = &day.color_domain {
        let _ = writeln!(
            html,
            r#"<div class="axis">Colour scale YlOrRd: {:.2} (yellow) to {:.2} (red)</div>"#,
            domain.min, domain.max
        );
    }
    html.push_str("</figure>\n");

    let _ = write!(
        html,
        r#"<figure>
<figcaption>Distribution of FWI Values</figcaption>
<img src="/histogram.png{query}" alt="FWI histogram for {date}">
<div class="axis">x: FWI Value, y: Frequency</div>
"#
    );
    if let Some(hist) = &day.histogram {
        if let (Some(lo), Some(hi)) = (hist.edges.first(), hist.edges.last()) {
            let _ = writeln!(
                html,
                r#"<div class="axis">{} bins from {:.2} to {:.2}, {} values</div>"#,
                hist.bin_count(),
                lo,
                hi,
                hist.total
            );
        }
    }
    html.push_str("</figure>\n");
}
