//! Descriptive statistics over small numeric samples.

use serde::Serialize;

/// Mean, median, extremes and population standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Middle value (mean of the two middle values for even counts).
    pub median: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Population standard deviation (divides by n).
    pub std: f64,
}

impl SummaryStats {
    /// Summarize `values`. Returns `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            mean,
            median,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            std: variance.sqrt(),
        })
    }

    /// Summarize integer counts.
    pub fn from_counts(values: impl IntoIterator<Item = usize>) -> Option<Self> {
        let values: Vec<f64> = values.into_iter().map(|v| v as f64).collect();
        Self::from_values(&values)
    }
}

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
