//! RGBA drawing surface backed by tiny-skia.

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::colorscale::Color;
use crate::error::{RenderError, RenderResult};
use crate::png::encode_png;

/// Largest edge accepted for a canvas.
pub const MAX_DIMENSION: u32 = 4096;

/// A raster with an opaque background.
pub struct Canvas {
    pixmap: Pixmap,
    anti_alias: bool,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> RenderResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::InvalidSize { width, height });
        }
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            background.a,
        ));
        Ok(Self {
            pixmap,
            anti_alias: true,
        })
    }

    /// Toggle anti-aliasing for subsequent drawing.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = self.anti_alias;
        paint
    }

    /// Filled circle centred on `(cx, cy)`.
    pub fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let Some(path) = PathBuilder::from_circle(cx, cy, radius) else {
            return;
        };
        let paint = self.paint(color);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Axis-aligned filled rectangle. Empty rectangles are skipped.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            return;
        };
        let paint = self.paint(color);
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Connected line through `points`, optionally closed.
    pub fn stroke_polyline(&mut self, points: &[(f32, f32)], closed: bool, width: f32, color: Color) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        for &(x, y) in rest {
            pb.line_to(x, y);
        }
        if closed {
            pb.close();
        }

        let Some(path) = pb.finish() else {
            return;
        };
        let paint = self.paint(color);
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Straight line segment.
    pub fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        self.stroke_polyline(&[from, to], false, width, color);
    }

    /// Colour at `(x, y)`, un-premultiplied.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Straight (non-premultiplied) RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        encode_png(
            &self.to_rgba(),
            self.width() as usize,
            self.height() as usize,
        )
    }
}
