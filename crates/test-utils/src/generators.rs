//! Test data generators for synthetic FWI grids.
//!
//! These generators create predictable, verifiable patterns that can be used
//! across the test suite.

/// Creates an FWI-like grid with a warm/dry south-west corner.
///
/// Values range from 0 (north-east) to about `peak` (south-west), with an
/// unrounded fractional part so that rounding behaviour is exercised.
pub fn create_fwi_grid(width: usize, height: usize, peak: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let x_factor = 1.0 - col as f32 / width.max(1) as f32;
            let y_factor = row as f32 / height.max(1) as f32;
            let value = peak * (x_factor + y_factor) / 2.0 + 0.123_456;
            data.push(value);
        }
    }
    data
}

/// Creates a grid with NaN values at specified positions.
///
/// * `nan_positions` - List of (col, row) positions that should be NaN
///
/// Returns a grid filled with `fill` and NaN at the given positions.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    fill: f32,
    nan_positions: &[(usize, usize)],
) -> Vec<f32> {
    let mut data = vec![fill; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f32::NAN;
        }
    }
    data
}

/// Evenly spaced coordinate axis from `start` with step `step`.
pub fn create_axis(start: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}
