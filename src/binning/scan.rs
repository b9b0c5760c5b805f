//! Cell-by-cell scan.
//!
//! For each row the samples inside the row's y-band are collected once, then
//! each column filters that band with the x test. Rows are independent; with
//! the `parallel` feature they run on the rayon pool.

use crate::axis::Axis;
use crate::samples::Samples;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Row-major membership lists for every cell.
pub(super) fn memberships(
    samples: &Samples<'_>,
    x_axis: &Axis,
    y_axis: &Axis,
    half: f64,
) -> Vec<Vec<usize>> {
    let scan = |row: usize| scan_row(samples, x_axis, y_axis.value(row), half, row);

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<Vec<usize>>> = (0..y_axis.len()).into_par_iter().map(scan).collect();

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<Vec<usize>>> = (0..y_axis.len()).map(scan).collect();

    rows.into_iter().flatten().collect()
}

fn scan_row(
    samples: &Samples<'_>,
    x_axis: &Axis,
    yc: f64,
    half: f64,
    row: usize,
) -> Vec<Vec<usize>> {
    let (xs, ys) = (samples.x(), samples.y());

    let band: Vec<usize> = (0..samples.len())
        .filter(|&i| (ys[i] - yc).abs() < half)
        .collect();

    trace!(row, band = band.len(), "scanning row");

    x_axis
        .iter()
        .map(|xc| {
            band.iter()
                .copied()
                .filter(|&i| (xs[i] - xc).abs() < half)
                .collect()
        })
        .collect()
}
