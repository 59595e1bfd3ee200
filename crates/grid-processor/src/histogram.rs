//! Fixed-bin frequency histogram of FWI values.

use serde::Serialize;

/// Number of bins used by the dashboard histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Equal-width bins over `[min, max]`.
///
/// Bins are half-open `[lo, hi)` except the last, which also includes `max`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
    pub total: u64,
}

impl Histogram {
    /// Bin finite `values` into `bins` bins spanning their own range.
    ///
    /// Returns `None` when there is nothing to bin. A single distinct value
    /// gets a unit-wide range centred on it.
    pub fn from_values<I>(values: I, bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let bins = bins.max(1);
        let values: Vec<f64> = values
            .into_iter()
            .filter(|v| v.is_finite())
            .map(f64::from)
            .collect();
        if values.is_empty() {
            return None;
        }

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0u64; bins];
        for v in &values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self {
            edges,
            counts,
            total: values.len() as u64,
        })
    }

    /// Histogram with the dashboard's bin count.
    pub fn standard<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        Self::from_values(values, HISTOGRAM_BINS)
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Largest bin count.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(lo, hi)` edges of bin `i`.
    pub fn bin_range(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.edges.get(i)?, *self.edges.get(i + 1)?))
    }

    /// Midpoint of bin `i`.
    pub fn bin_center(&self, i: usize) -> Option<f64> {
        self.bin_range(i).map(|(lo, hi)| (lo + hi) / 2.0)
    }
}
