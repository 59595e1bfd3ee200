//! Bar chart rendering for histograms.

use crate::canvas::Canvas;
use crate::colorscale::Color;
use crate::error::RenderResult;

/// Layout and colours of the histogram image.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    /// Pixels left empty between adjacent bars.
    pub bar_gap: f32,
    pub background: Color,
    pub bar_color: Color,
    pub axis_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            padding: 30,
            bar_gap: 1.0,
            background: Color::WHITE,
            bar_color: Color::rgb(0x63, 0x6e, 0xfa),
            axis_color: Color::rgb(68, 68, 68),
        }
    }
}

/// Draw one bar per count, heights scaled to the largest count.
///
/// Drawing is not anti-aliased so the result encodes as an indexed PNG.
pub fn draw_histogram(counts: &[u64], style: &ChartStyle) -> RenderResult<Canvas> {
    let mut canvas = Canvas::new(style.width, style.height, style.background)?.with_anti_alias(false);

    let pad = style.padding as f32;
    let left = pad;
    let right = (style.width as f32 - pad).max(left + 1.0);
    let top = pad;
    let bottom = (style.height as f32 - pad).max(top + 1.0);

    let max_count = counts.iter().copied().max().unwrap_or(0);
    if !counts.is_empty() && max_count > 0 {
        let slot = (right - left) / counts.len() as f32;
        let gap = style.bar_gap.min(slot / 2.0);
        for (i, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let h = (bottom - top) * count as f32 / max_count as f32;
            let x = left + slot * i as f32 + gap / 2.0;
            canvas.fill_rect(x, bottom - h, slot - gap, h, style.bar_color);
        }
    }

    canvas.stroke_line((left, bottom), (right, bottom), 1.0, style.axis_color);
    canvas.stroke_line((left, top), (left, bottom), 1.0, style.axis_color);

    Ok(canvas)
}

/// Draw and encode as PNG.
pub fn render_histogram(counts: &[u64], style: &ChartStyle) -> RenderResult<Vec<u8>> {
    draw_histogram(counts, style)?.encode_png()
}
