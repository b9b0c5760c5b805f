//! Sample-driven bucketing.
//!
//! Each sample is visited once. [`Axis::within`] bisects each axis for the
//! centres that pass the same strict predicate the scan applies, so
//! membership is identical even where rounding makes centres uneven. Samples
//! are visited in index order, which keeps every cell's list ascending.

use crate::axis::Axis;
use crate::samples::Samples;

/// Row-major membership lists for every cell.
pub(super) fn memberships(
    samples: &Samples<'_>,
    x_axis: &Axis,
    y_axis: &Axis,
    half: f64,
) -> Vec<Vec<usize>> {
    let cols = x_axis.len();
    let mut cells = vec![Vec::new(); y_axis.len() * cols];

    for (i, (&x, &y)) in samples.x().iter().zip(samples.y()).enumerate() {
        let col_range = x_axis.within(x, half);
        for row in y_axis.within(y, half) {
            for col in col_range.clone() {
                cells[row * cols + col].push(i);
            }
        }
    }

    cells
}
