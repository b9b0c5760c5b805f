//! Median and range reductions over binned data.

use serde::Serialize;
use trueno::Vector;

/// Returns true if `value` holds data (is not the NaN empty-cell sentinel).
#[inline]
#[must_use]
pub fn has_data(value: f64) -> bool {
    !value.is_nan()
}

/// Median of `values`, reordering the slice in place.
///
/// For an even count the result is the mean of the two central values.
/// Returns `None` for an empty slice and NaN if any value is NaN.
pub fn median(values: &mut [f64]) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    if values.iter().any(|v| v.is_nan()) {
        return Some(f64::NAN);
    }

    let mid = n / 2;
    let (lower, upper, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;

    if n % 2 == 1 {
        return Some(upper);
    }

    // The lower half is unordered; its maximum is the other central value.
    let lower_max = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((lower_max + upper) / 2.0)
}

/// Min/max over the values that hold data, or `None` if there are none.
pub fn value_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|&v| has_data(v))
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
}

/// Occupancy summary of a bin count grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CountSummary {
    /// Sum of all counts (may exceed the sample count when a sample sits in
    /// two overlapping cells).
    pub total: usize,
    /// Number of cells with at least one sample.
    pub occupied: usize,
    /// Number of empty cells.
    pub empty: usize,
    /// Largest count in any cell.
    pub max: usize,
    /// Mean count over occupied cells (0 when none are occupied).
    pub mean_occupied: f32,
}

impl CountSummary {
    /// Summarise a slice of cell counts.
    #[must_use]
    pub fn from_counts(counts: &[usize]) -> Self {
        let occupied: Vec<f32> = counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| c as f32)
            .collect();

        let occupied_cells = occupied.len();
        let mean_occupied = if occupied.is_empty() {
            0.0
        } else {
            Vector::from_vec(occupied).mean().unwrap_or(0.0)
        };

        Self {
            total: counts.iter().sum(),
            occupied: occupied_cells,
            empty: counts.len() - occupied_cells,
            max: counts.iter().copied().max().unwrap_or(0),
            mean_occupied,
        }
    }
}
