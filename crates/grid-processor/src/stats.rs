//! Summary statistics over a flattened record set.

use serde::Serialize;

use crate::flatten::FwiRecord;
use crate::select::round_2dp_f64;

/// Mean, maximum and minimum of the non-missing values, rounded to two
/// decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

impl SummaryStats {
    /// Compute statistics over finite values. Returns `None` when there are
    /// none.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for v in values.into_iter().filter(|v| v.is_finite()) {
            let v = v as f64;
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            mean: round_2dp_f64(sum / count as f64),
            max: round_2dp_f64(max),
            min: round_2dp_f64(min),
            count,
        })
    }

    pub fn from_records(records: &[FwiRecord]) -> Option<Self> {
        Self::from_values(records.iter().map(|r| r.fwi_value))
    }

    /// The per-day colour scale domain.
    pub fn color_domain(&self) -> ColorDomain {
        ColorDomain {
            min: self.min,
            max: self.max,
        }
    }

    /// Display lines, e.g. `Mean FWI: 2.00`.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Mean FWI: {:.2}", self.mean),
            format!("Max FWI: {:.2}", self.max),
            format!("Min FWI: {:.2}", self.min),
        ]
    }
}

/// Value range mapped onto the colour scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDomain {
    pub min: f64,
    pub max: f64,
}
