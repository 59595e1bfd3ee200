//! Colour-scaled point map of FWI values.
//!
//! Each point is a filled disc placed on an equirectangular canvas that is
//! fitted to a geographic extent. Boundary rings, when supplied, are drawn
//! underneath the markers. A vertical colour bar sits at the right edge.

use fwi_common::BoundingBox;
use tracing::debug;

use crate::canvas::Canvas;
use crate::colorscale::{Color, ColorScale};
use crate::error::RenderResult;

/// One plotted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub value: f64,
}

/// A closed boundary line as `(longitude, latitude)` vertices.
pub type Ring = Vec<(f64, f64)>;

/// Layout and colours of the map image.
#[derive(Debug, Clone)]
pub struct MapStyle {
    pub width: u32,
    pub height: u32,
    /// Disc radius in pixels.
    pub marker_radius: f32,
    /// Space between the plotted extent and the image edge.
    pub padding_px: f64,
    /// Width of the colour bar, 0 to omit it.
    pub colorbar_width: u32,
    pub background: Color,
    pub boundary_color: Color,
    pub boundary_width: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            marker_radius: 4.0,
            padding_px: 10.0,
            colorbar_width: 16,
            background: Color::WHITE,
            boundary_color: Color::rgb(128, 128, 128),
            boundary_width: 1.0,
        }
    }
}

/// Inputs of one map rendering.
#[derive(Debug, Clone)]
pub struct ScatterMap<'a> {
    pub points: &'a [MapPoint],
    /// Geographic area the canvas is fitted to.
    pub extent: BoundingBox,
    /// Values mapped to the two ends of the colour scale.
    pub domain: (f64, f64),
    pub boundaries: &'a [Ring],
}

/// Equirectangular mapping from lon/lat to pixel coordinates.
///
/// Degrees of longitude and latitude get the same pixel size; the extent is
/// centred in the available area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    extent: BoundingBox,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl MapFrame {
    /// Fit `extent` into a `width` x `height` area with `padding` pixels on
    /// every side.
    pub fn fit(extent: BoundingBox, width: u32, height: u32, padding: f64) -> Self {
        let avail_w = (width as f64 - 2.0 * padding).max(1.0);
        let avail_h = (height as f64 - 2.0 * padding).max(1.0);
        let span_x = extent.width().max(f64::EPSILON);
        let span_y = extent.height().max(f64::EPSILON);
        let scale = (avail_w / span_x).min(avail_h / span_y);

        Self {
            extent,
            scale,
            offset_x: (width as f64 - extent.width() * scale) / 2.0,
            offset_y: (height as f64 - extent.height() * scale) / 2.0,
        }
    }

    /// Pixel position of a lon/lat pair. North is up.
    pub fn project(&self, lon: f64, lat: f64) -> (f32, f32) {
        let x = self.offset_x + (lon - self.extent.min_x) * self.scale;
        let y = self.offset_y + (self.extent.max_y - lat) * self.scale;
        (x as f32, y as f32)
    }

    /// Pixels per degree.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Draw the map onto a new canvas.
pub fn draw_scatter_map(map: &ScatterMap<'_>, style: &MapStyle, scale: &ColorScale) -> RenderResult<Canvas> {
    let mut canvas = Canvas::new(style.width, style.height, style.background)?;

    let plot_width = style.width.saturating_sub(style.colorbar_width * 2).max(1);
    let frame = MapFrame::fit(map.extent, plot_width, style.height, style.padding_px);

    let visible: Vec<&Ring> = map
        .boundaries
        .iter()
        .filter(|ring| ring_overlaps(ring, &map.extent))
        .collect();
    for ring in &visible {
        let pixels: Vec<(f32, f32)> = ring.iter().map(|&(lon, lat)| frame.project(lon, lat)).collect();
        canvas.stroke_polyline(&pixels, true, style.boundary_width, style.boundary_color);
    }

    let (min, max) = map.domain;
    for p in map.points {
        if !p.value.is_finite() {
            continue;
        }
        let (x, y) = frame.project(p.longitude, p.latitude);
        canvas.fill_disc(x, y, style.marker_radius, scale.map(p.value, min, max));
    }

    if style.colorbar_width > 0 {
        draw_colorbar(&mut canvas, style, scale);
    }

    debug!(
        points = map.points.len(),
        rings = visible.len(),
        culled = map.boundaries.len() - visible.len(),
        width = style.width,
        height = style.height,
        "Drew scatter map"
    );
    Ok(canvas)
}

/// Whether any part of the ring's bounding box lies inside `extent`.
fn ring_overlaps(ring: &Ring, extent: &BoundingBox) -> bool {
    BoundingBox::from_points(ring.iter().copied()).is_some_and(|bbox| bbox.intersects(extent))
}

/// Draw the map with the YlOrRd scale and encode it as PNG.
pub fn render_scatter_map(map: &ScatterMap<'_>, style: &MapStyle) -> RenderResult<Vec<u8>> {
    draw_scatter_map(map, style, &ColorScale::yl_or_rd())?.encode_png()
}

/// Vertical bar, domain max at the top.
fn draw_colorbar(canvas: &mut Canvas, style: &MapStyle, scale: &ColorScale) {
    let bar_w = style.colorbar_width as f32;
    let x = style.width as f32 - bar_w * 1.5;
    let top = style.padding_px as f32;
    let bottom = style.height as f32 - style.padding_px as f32;
    let rows = (bottom - top).max(1.0) as u32;

    for i in 0..rows {
        let t = 1.0 - i as f32 / rows.saturating_sub(1).max(1) as f32;
        canvas.fill_rect(x, top + i as f32, bar_w, 1.0, scale.at(t));
    }
}
