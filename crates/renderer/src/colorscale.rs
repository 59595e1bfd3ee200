//! Continuous colour scales.

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::rgb(r, g, b))
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)).round() as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)).round() as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)).round() as u8,
        ((color1.a as f32 * t_inv) + (color2.a as f32 * t)).round() as u8,
    )
}

/// ColorBrewer YlOrRd, 9 classes, light to dark.
const YLORRD: [&str; 9] = [
    "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026",
    "#800026",
];

/// Evenly spaced colour stops interpolated linearly.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<Color>,
}

impl ColorScale {
    /// Returns `None` for an empty stop list.
    pub fn new(stops: Vec<Color>) -> Option<Self> {
        if stops.is_empty() {
            None
        } else {
            Some(Self { stops })
        }
    }

    /// Yellow-orange-red sequential scale.
    pub fn yl_or_rd() -> Self {
        let stops = YLORRD.iter().filter_map(|h| Color::from_hex(h)).collect();
        Self { stops }
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range values clamp.
    pub fn at(&self, t: f32) -> Color {
        let last = self.stops.len() - 1;
        if last == 0 || t.is_nan() {
            return self.stops[0];
        }
        let pos = t.clamp(0.0, 1.0) * last as f32;
        let low = (pos.floor() as usize).min(last - 1);
        interpolate_color(self.stops[low], self.stops[low + 1], pos - low as f32)
    }

    /// Colour for `value` within `[min, max]`.
    ///
    /// A zero-width domain maps everything to the middle of the scale.
    pub fn map(&self, value: f64, min: f64, max: f64) -> Color {
        let range = max - min;
        let t = if range.abs() < f64::EPSILON {
            0.5
        } else {
            (value - min) / range
        };
        self.at(t as f32)
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::yl_or_rd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(Color::from_hex("#GGGGGG"), None);
        assert_eq!(Color::from_hex("#FFF"), None);
    }

    #[test]
    fn test_yl_or_rd_has_nine_stops() {
        let scale = ColorScale::yl_or_rd();
        assert_eq!(scale.stops().len(), 9);
        assert_eq!(scale.at(0.0), Color::rgb(0xff, 0xff, 0xcc));
        assert_eq!(scale.at(1.0), Color::rgb(0x80, 0x00, 0x26));
    }

    #[test]
    fn test_single_stop_scale() {
        let scale = ColorScale::new(vec![Color::BLACK]).unwrap();
        assert_eq!(scale.at(0.7), Color::BLACK);
        assert!(ColorScale::new(vec![]).is_none());
    }
}
