//! Median binning of scattered samples onto a regular grid.
//!
//! The grid covers `[xmin, xmax] x [ymin, ymax]` with axes generated by
//! [`Axis::spanning`]. Row index varies over y, column index over x. A sample
//! `i` belongs to cell `(row, col)` when
//!
//! ```text
//! |x[i] - x_axis[col]| < binsize / 2  &&  |y[i] - y_axis[row]| < binsize / 2
//! ```
//!
//! Both inequalities are strict: a sample exactly half a bin from a centre is
//! excluded from that cell. Depending on how the axis values round, a sample
//! near a shared edge can land in both neighbouring cells or in neither.
//!
//! # Strategies
//!
//! - [`Strategy::Scan`] tests every sample against every cell centre,
//!   O(rows x cols x n).
//! - [`Strategy::Bucketed`] visits each sample once and bisects the axes for
//!   the centres it falls near, O(n log(rows + cols) + rows x cols).
//!
//! Both apply the same predicate to the same centres and return identical
//! results.

mod bucket;
mod scan;

use crate::axis::Axis;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::samples::{Bounds, Samples};
use crate::stats::{self, CountSummary};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Default cap on `rows * cols`.
pub const DEFAULT_MAX_CELLS: usize = 50_000_000;

/// How cell membership is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Test every sample against every cell.
    #[default]
    Scan,
    /// Visit each sample once and bisect the axes for its cells.
    Bucketed,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Scan => f.write_str("scan"),
            Strategy::Bucketed => f.write_str("bucketed"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(Strategy::Scan),
            "bucketed" | "bucket" => Ok(Strategy::Bucketed),
            other => Err(Error::invalid(format!(
                "unknown strategy '{other}' (expected 'scan' or 'bucketed')"
            ))),
        }
    }
}

/// Builder for a binning run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBinner {
    binsize: f64,
    strategy: Strategy,
    max_cells: usize,
}

impl GridBinner {
    /// Create a binner with the given bin size (full width and height of
    /// each cell).
    #[must_use]
    pub fn new(binsize: f64) -> Self {
        Self {
            binsize,
            strategy: Strategy::default(),
            max_cells: DEFAULT_MAX_CELLS,
        }
    }

    /// Set the membership strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the maximum number of grid cells.
    #[must_use]
    pub fn max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// The configured bin size.
    #[must_use]
    pub const fn binsize(&self) -> f64 {
        self.binsize
    }

    /// Check the bin size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless the bin size is finite and
    /// positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.binsize.is_finite() && self.binsize > 0.0) {
            return Err(Error::invalid(format!(
                "binsize must be finite and positive, got {}",
                self.binsize
            )));
        }
        Ok(())
    }

    /// Validate raw columns and bin them.
    ///
    /// # Errors
    ///
    /// See [`Samples::new`] and [`GridBinner::bin`].
    pub fn bin_slices(&self, x: &[f64], y: &[f64], z: &[f64]) -> Result<BinnedGrid> {
        let samples = Samples::new(x, y, z)?;
        self.bin(&samples)
    }

    /// Bin a sample set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an invalid bin size and
    /// [`Error::GridTooLarge`] if the axes would exceed the cell cap. No grid
    /// is allocated in either case.
    pub fn bin(&self, samples: &Samples<'_>) -> Result<BinnedGrid> {
        self.validate()?;

        let Some(bounds) = samples.bounds() else {
            debug!("no samples, returning empty grid");
            return Ok(BinnedGrid::empty(self.binsize));
        };

        let x_axis = Axis::spanning(bounds.xmin, bounds.xmax, self.binsize);
        let y_axis = Axis::spanning(bounds.ymin, bounds.ymax, self.binsize);
        let (rows, cols) = (y_axis.len(), x_axis.len());

        match rows.checked_mul(cols) {
            Some(cells) if cells <= self.max_cells => {}
            _ => {
                return Err(Error::GridTooLarge {
                    rows,
                    cols,
                    limit: self.max_cells,
                })
            }
        }

        debug!(
            rows,
            cols,
            samples = samples.len(),
            binsize = self.binsize,
            strategy = %self.strategy,
            "binning samples"
        );

        let half = self.binsize / 2.0;
        let members = match self.strategy {
            Strategy::Scan => scan::memberships(samples, &x_axis, &y_axis, half),
            Strategy::Bucketed => bucket::memberships(samples, &x_axis, &y_axis, half),
        };

        let membership =
            Grid::from_vec(rows, cols, members).expect("strategy yields rows * cols cells");

        Ok(BinnedGrid::assemble(
            membership,
            samples.z(),
            x_axis,
            y_axis,
            self.binsize,
            bounds,
        ))
    }
}

/// Bin `(x, y, z)` samples onto a grid with cells of side `binsize`.
///
/// Shorthand for `GridBinner::new(binsize).bin_slices(x, y, z)`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the columns differ in length, a
/// coordinate is not finite, or `binsize` is not a positive finite number.
pub fn griddata(x: &[f64], y: &[f64], z: &[f64], binsize: f64) -> Result<BinnedGrid> {
    GridBinner::new(binsize).bin_slices(x, y, z)
}

/// The output of a binning run: values, counts and membership sharing one
/// shape and indexing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedGrid {
    values: Grid<f64>,
    counts: Grid<usize>,
    membership: Grid<Vec<usize>>,
    x_axis: Axis,
    y_axis: Axis,
    binsize: f64,
    bounds: Option<Bounds>,
}

impl BinnedGrid {
    fn empty(binsize: f64) -> Self {
        Self {
            values: Grid::from_fn(0, 0, |_, _| f64::NAN),
            counts: Grid::from_fn(0, 0, |_, _| 0),
            membership: Grid::from_fn(0, 0, |_, _| Vec::new()),
            x_axis: Axis::empty(binsize),
            y_axis: Axis::empty(binsize),
            binsize,
            bounds: None,
        }
    }

    fn assemble(
        membership: Grid<Vec<usize>>,
        z: &[f64],
        x_axis: Axis,
        y_axis: Axis,
        binsize: f64,
        bounds: Bounds,
    ) -> Self {
        let mut scratch = Vec::new();
        let values = membership.map(|members| {
            scratch.clear();
            scratch.extend(members.iter().map(|&i| z[i]));
            stats::median(&mut scratch).unwrap_or(f64::NAN)
        });
        let counts = membership.map(Vec::len);

        Self {
            values,
            counts,
            membership,
            x_axis,
            y_axis,
            binsize,
            bounds: Some(bounds),
        }
    }

    /// Median value per cell; NaN for empty cells.
    #[must_use]
    pub const fn values(&self) -> &Grid<f64> {
        &self.values
    }

    /// Number of samples per cell.
    #[must_use]
    pub const fn counts(&self) -> &Grid<usize> {
        &self.counts
    }

    /// Ascending sample indices per cell.
    #[must_use]
    pub const fn membership(&self) -> &Grid<Vec<usize>> {
        &self.membership
    }

    /// Column coordinates (cell centres along x).
    #[must_use]
    pub const fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    /// Row coordinates (cell centres along y).
    #[must_use]
    pub const fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    /// Bin size used for this grid.
    #[must_use]
    pub const fn binsize(&self) -> f64 {
        self.binsize
    }

    /// `(rows, cols)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Extent of the input samples as `(xmin, xmax, ymin, ymax)`, or `None`
    /// if there were no samples.
    #[must_use]
    pub fn extent(&self) -> Option<(f64, f64, f64, f64)> {
        self.bounds.map(|b| (b.xmin, b.xmax, b.ymin, b.ymax))
    }

    /// A view of one cell, or `None` out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell<'_>> {
        Some(Cell {
            row,
            col,
            x: self.x_axis.get(col)?,
            y: self.y_axis.get(row)?,
            value: *self.values.get(row, col)?,
            count: *self.counts.get(row, col)?,
            members: self.membership.get(row, col)?,
        })
    }

    /// Iterate over the cells that hold at least one sample, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = Cell<'_>> {
        self.counts
            .indexed()
            .filter(|(_, count)| **count > 0)
            .filter_map(|((row, col), _)| self.cell(row, col))
    }

    /// Min/max over the non-empty cells, e.g. for a shared colour scale.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        stats::value_range(self.values.as_slice().iter().copied())
    }

    /// Occupancy summary of the count grid.
    #[must_use]
    pub fn count_summary(&self) -> CountSummary {
        CountSummary::from_counts(self.counts.as_slice())
    }

    /// A serialisable description of the grid without the cell arrays.
    #[must_use]
    pub fn summary(&self) -> GridSummary {
        GridSummary {
            rows: self.values.rows(),
            cols: self.values.cols(),
            binsize: self.binsize,
            x_axis: self.x_axis,
            y_axis: self.y_axis,
            extent: self.bounds,
            value_range: self.value_range(),
            counts: self.count_summary(),
        }
    }
}

/// Borrowed view of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell<'a> {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
    /// x-coordinate of the cell centre.
    pub x: f64,
    /// y-coordinate of the cell centre.
    pub y: f64,
    /// Median of the member z-values, NaN if empty.
    pub value: f64,
    /// Number of member samples.
    pub count: usize,
    /// Ascending member sample indices.
    pub members: &'a [usize],
}

/// Shape, axes and summary statistics of a [`BinnedGrid`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    /// Number of rows (y-axis length).
    pub rows: usize,
    /// Number of columns (x-axis length).
    pub cols: usize,
    /// Bin size.
    pub binsize: f64,
    /// Column axis.
    pub x_axis: Axis,
    /// Row axis.
    pub y_axis: Axis,
    /// Sample extent.
    pub extent: Option<Bounds>,
    /// Min/max over non-empty cells.
    pub value_range: Option<(f64, f64)>,
    /// Count grid occupancy.
    pub counts: CountSummary,
}
