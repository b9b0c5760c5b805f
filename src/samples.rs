//! Validated sample sets.
//!
//! A sample set is three equal-length columns: x-coordinates, y-coordinates
//! and the dependent values `z = f(x, y)`.

use crate::error::{Error, Result};
use serde::Serialize;

/// Borrowed, validated view over three sample columns.
///
/// Construction guarantees equal lengths and finite x/y coordinates. The z
/// column is not checked; a NaN z value propagates into the median of any
/// cell that contains it.
#[derive(Debug, Clone, Copy)]
pub struct Samples<'a> {
    x: &'a [f64],
    y: &'a [f64],
    z: &'a [f64],
}

impl<'a> Samples<'a> {
    /// Validate and wrap three sample columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the lengths differ or any x/y
    /// coordinate is NaN or infinite.
    pub fn new(x: &'a [f64], y: &'a [f64], z: &'a [f64]) -> Result<Self> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(Error::invalid(format!(
                "sample length mismatch: x has {}, y has {}, z has {} elements",
                x.len(),
                y.len(),
                z.len()
            )));
        }

        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(Error::invalid(format!("x[{i}] is not finite: {}", x[i])));
        }
        if let Some(i) = y.iter().position(|v| !v.is_finite()) {
            return Err(Error::invalid(format!("y[{i}] is not finite: {}", y[i])));
        }

        Ok(Self { x, y, z })
    }

    /// Number of samples.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if there are no samples.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The x column.
    #[must_use]
    pub const fn x(&self) -> &'a [f64] {
        self.x
    }

    /// The y column.
    #[must_use]
    pub const fn y(&self) -> &'a [f64] {
        self.y
    }

    /// The z column.
    #[must_use]
    pub const fn z(&self) -> &'a [f64] {
        self.z
    }

    /// Coordinate extrema, or `None` for an empty set.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let (xmin, xmax) = extrema(self.x)?;
        let (ymin, ymax) = extrema(self.y)?;
        Some(Bounds {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }
}

fn extrema(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Extent of the sample coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// Smallest x.
    pub xmin: f64,
    /// Largest x.
    pub xmax: f64,
    /// Smallest y.
    pub ymin: f64,
    /// Largest y.
    pub ymax: f64,
}

/// Owned sample columns, as loaded from a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleColumns {
    /// x-coordinates.
    pub x: Vec<f64>,
    /// y-coordinates.
    pub y: Vec<f64>,
    /// Dependent values.
    pub z: Vec<f64>,
}

impl SampleColumns {
    /// Create empty columns with room for `n` samples.
    #[must_use]
    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
        }
    }

    /// Append one sample.
    pub fn push(&mut self, x: f64, y: f64, z: f64) {
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
    }

    /// Number of samples (length of the x column).
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Borrow as a validated [`Samples`] view.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Samples::new`].
    pub fn as_samples(&self) -> Result<Samples<'_>> {
        Samples::new(&self.x, &self.y, &self.z)
    }
}
