//! Image rendering for the FWI dashboard.
//!
//! - Colour-scaled scatter maps with optional boundary overlay
//! - Histogram bar charts
//! - PNG encoding (indexed when the palette fits, RGBA otherwise)

pub mod canvas;
pub mod chart;
pub mod colorscale;
pub mod error;
pub mod png;
pub mod scatter;

pub use canvas::Canvas;
pub use chart::{draw_histogram, render_histogram, ChartStyle};
pub use colorscale::{interpolate_color, Color, ColorScale};
pub use error::{RenderError, RenderResult};
pub use png::{encode_png, encode_png_indexed, encode_png_rgba, is_png, png_dimensions};
pub use scatter::{draw_scatter_map, render_scatter_map, MapFrame, MapPoint, MapStyle, Ring, ScatterMap};
