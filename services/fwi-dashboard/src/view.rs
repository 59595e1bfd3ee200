//! Everything the dashboard shows for one selected date.

use fwi_common::{BoundingBox, DateQuery, FwiResult, GriddedDataset};
use grid_processor::{flatten, fwi_values, select_slice, ColorDomain, FwiRecord, Histogram, SelectError, SummaryStats};
use renderer::{MapPoint, Ring, ScatterMap};
use serde::Serialize;

/// Shown instead of the analysis when the date has no time slice.
pub const NOT_AVAILABLE_MESSAGE: &str = "The selected date is not available in the dataset.";

/// Outcome of selecting a date.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    Available(DayView),
    Unavailable { date: String, message: &'static str },
}

/// Analysis of one available date.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: String,
    /// `None` when every cell of the day is missing.
    pub summary: Option<SummaryStats>,
    pub color_domain: Option<ColorDomain>,
    pub histogram: Option<Histogram>,
    /// Map area: the records' extent plus a margin, or the whole grid when
    /// the day has no records.
    pub extent: BoundingBox,
    pub records: Vec<FwiRecord>,
}

impl DayView {
    pub fn map_points(&self) -> Vec<MapPoint> {
        self.records
            .iter()
            .map(|r| MapPoint {
                longitude: r.longitude,
                latitude: r.latitude,
                value: r.fwi_value as f64,
            })
            .collect()
    }

    /// Colour scale endpoints; an arbitrary unit range when there is no data.
    pub fn domain(&self) -> (f64, f64) {
        self.color_domain.map(|d| (d.min, d.max)).unwrap_or((0.0, 1.0))
    }

    pub fn scatter_map<'a>(&self, points: &'a [MapPoint], boundaries: &'a [Ring]) -> ScatterMap<'a> {
        ScatterMap {
            points,
            extent: self.extent,
            domain: self.domain(),
            boundaries,
        }
    }
}

/// The first date in the dataset, used when no date is requested.
pub fn default_query(dataset: &GriddedDataset) -> Option<DateQuery> {
    dataset.times().first().map(|t| DateQuery::from_datetime(*t))
}

/// Full extent of the grid coordinates.
pub fn grid_extent(dataset: &GriddedDataset) -> Option<BoundingBox> {
    let lats = dataset.lats();
    let lons = dataset.lons();
    BoundingBox::from_points(
        lons.iter()
            .flat_map(|&lon| [lats.first(), lats.last()].into_iter().flatten().map(move |&lat| (lon, lat))),
    )
}

/// Select, flatten and summarize the requested date.
pub fn build_view(dataset: &GriddedDataset, query: &DateQuery, margin_deg: f64) -> FwiResult<DashboardView> {
    let slice = match select_slice(dataset, query) {
        Ok(slice) => slice,
        Err(SelectError::DateNotAvailable { date }) => {
            return Ok(DashboardView::Unavailable {
                date,
                message: NOT_AVAILABLE_MESSAGE,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let records = flatten(&slice);
    let summary = SummaryStats::from_records(&records);
    let histogram = Histogram::standard(fwi_values(&records));

    let extent = BoundingBox::from_points(records.iter().map(|r| (r.longitude, r.latitude)))
        .map(|b| b.expand(margin_deg))
        .or_else(|| grid_extent(dataset))
        .unwrap_or_else(|| BoundingBox::new(-180.0, -90.0, 180.0, 90.0));

    Ok(DashboardView::Available(DayView {
        date: slice.label(),
        color_domain: summary.map(|s| s.color_domain()),
        summary,
        histogram,
        extent,
        records,
    }))
}
