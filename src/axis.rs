//! Regularly spaced coordinate axes.
//!
//! An axis is the sequence `start, start + step, start + 2*step, ...` covering
//! the half-open range `[start, max + step)`, filled the way numpy's `arange`
//! fills it: the second value is `start + step`, and every later value is
//! `start + i * delta` with `delta = (start + step) - start`. Far from the
//! origin `delta` differs from `step` by rounding, so consecutive values can be
//! unevenly spaced or even equal. They are always non-decreasing.
use serde::Serialize;
use std::ops::Range;

/// A regularly spaced coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Axis {
    start: f64,
    step: f64,
    len: usize,
}

impl Axis {
    /// Create an axis with an explicit length.
    #[must_use]
    pub const fn new(start: f64, step: f64, len: usize) -> Self {
        Self { start, step, len }
    }

    /// Create an axis with no values.
    #[must_use]
    pub const fn empty(step: f64) -> Self {
        Self::new(0.0, step, 0)
    }

    /// Create the axis spanning `[min, max]` with the given step.
    ///
    /// The axis holds `ceil((max + step - min) / step)` values, so the last
    /// value may lie beyond `max`. When `min == max` it holds exactly one.
    /// Callers must ensure `step > 0` and both bounds are finite; lengths too
    /// large for `usize` saturate.
    #[must_use]
    pub fn spanning(min: f64, max: f64, step: f64) -> Self {
        if max <= min {
            return Self::new(min, step, 1);
        }

        let len = ((max + step - min) / step).ceil().max(1.0);
        Self::new(min, step, len as usize)
    }

    /// First value of the axis.
    #[must_use]
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Spacing between consecutive values.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Number of values.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the axis has no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The `i`-th value, or `None` past the end.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<f64> {
        (i < self.len).then(|| self.value(i))
    }

    /// The last value, or `None` for an empty axis.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.len.checked_sub(1).map(|i| self.value(i))
    }

    /// Iterate over all values.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(|i| self.value(i))
    }

    /// Collect all values.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Indices of the values strictly within `half` of `v`, i.e. every `i`
    /// with `(v - value(i)).abs() < half`.
    ///
    /// Values are non-decreasing, so the matching indices are contiguous and
    /// both ends are found by bisection over the actual values.
    #[must_use]
    pub fn within(&self, v: f64, half: f64) -> Range<usize> {
        if !v.is_finite() {
            return 0..0;
        }

        let lo = self.partition_point(|c| v - c >= half);
        let hi = self.partition_point(|c| v - c > -half);
        lo..hi.max(lo)
    }

    /// First index whose value fails `pred`; `pred` must hold for a prefix.
    fn partition_point(&self, pred: impl Fn(f64) -> bool) -> usize {
        let (mut lo, mut hi) = (0, self.len);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(self.value(mid)) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// The `i`-th value without a bounds check.
    #[inline]
    pub(crate) fn value(&self, i: usize) -> f64 {
        match i {
            0 => self.start,
            1 => self.start + self.step,
            _ => self.start + i as f64 * ((self.start + self.step) - self.start),
        }
    }
}
