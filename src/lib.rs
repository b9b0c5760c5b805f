//! # gridbin
//!
//! Places unevenly spaced 2D samples `z = f(x, y)` onto a regular grid by
//! nearest-neighbour median binning.
//!
//! Every grid cell is a square of side `binsize` centred on a generated axis
//! coordinate. A sample belongs to a cell when it lies strictly within
//! `binsize / 2` of the cell centre on both axes. The cell value is the median
//! of the member z-values, or NaN when the cell holds no samples. Alongside
//! the value grid the binner returns the per-cell sample count and the
//! per-cell sample indices.
//!
//! ## Quick Start
//!
//! ```rust
//! use gridbin::prelude::*;
//!
//! let x = [0.0, 0.05, 0.9];
//! let y = [0.0, 0.0, 0.0];
//! let z = [10.0, 20.0, 30.0];
//!
//! let grid = griddata(&x, &y, &z, 0.2)?;
//! assert_eq!(grid.shape(), (1, 6));
//! assert_eq!(grid.values()[(0, 0)], 15.0);
//! assert_eq!(grid.counts()[(0, 0)], 2);
//! # Ok::<(), gridbin::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: scan grid rows on a rayon thread pool

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Regularly spaced coordinate axes.
pub mod axis;

/// Row-major 2D containers.
pub mod grid;

/// Validated sample sets.
pub mod samples;

/// Median and range reductions.
pub mod stats;

/// The grid binner.
pub mod binning;

// ============================================================================
// Outer Layers
// ============================================================================

/// YAML configuration.
pub mod config;

/// CSV input and output.
pub mod io;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for gridbin operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use gridbin::prelude::*;
/// ```
pub mod prelude {
    pub use crate::axis::Axis;
    pub use crate::binning::{griddata, BinnedGrid, Cell, GridBinner, GridSummary, Strategy};
    pub use crate::config::BinConfig;
    pub use crate::error::{Error, Result};
    pub use crate::grid::Grid;
    pub use crate::samples::{Bounds, SampleColumns, Samples};
    pub use crate::stats::{has_data, median, CountSummary};
}
