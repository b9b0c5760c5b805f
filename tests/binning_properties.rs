//! Property tests for grid binning.
//!
//! Run: cargo test --test binning_properties

#![allow(clippy::unwrap_used)]

use gridbin::axis::Axis;
use gridbin::binning::{griddata, GridBinner, Strategy as BinStrategy};
use gridbin::Error;
use proptest::prelude::*;

fn sample_set() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
    (1usize..60).prop_flat_map(|n| {
        (
            prop::collection::vec(-5.0f64..5.0, n),
            prop::collection::vec(-5.0f64..5.0, n),
            prop::collection::vec(-100.0f64..100.0, n),
        )
    })
}

fn naive_median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// counts[r][c] == len(membership[r][c]) for every cell.
    #[test]
    fn prop_counts_match_membership(
        (x, y, z) in sample_set(),
        binsize in 0.05f64..3.0
    ) {
        let grid = griddata(&x, &y, &z, binsize).unwrap();
        for ((r, c), members) in grid.membership().indexed() {
            prop_assert_eq!(grid.counts()[(r, c)], members.len());
        }
    }

    /// A cell is NaN exactly when it is empty.
    #[test]
    fn prop_nan_iff_empty(
        (x, y, z) in sample_set(),
        binsize in 0.05f64..3.0
    ) {
        let grid = griddata(&x, &y, &z, binsize).unwrap();
        for ((r, c), &count) in grid.counts().indexed() {
            prop_assert_eq!(grid.values()[(r, c)].is_nan(), count == 0);
        }
    }

    /// A non-empty cell holds the median of its members' z-values, and every
    /// member passes the strict half-bin test.
    #[test]
    fn prop_value_is_member_median(
        (x, y, z) in sample_set(),
        binsize in 0.05f64..3.0
    ) {
        let grid = griddata(&x, &y, &z, binsize).unwrap();
        let half = binsize / 2.0;
        for cell in grid.occupied() {
            for &i in cell.members {
                prop_assert!((x[i] - cell.x).abs() < half);
                prop_assert!((y[i] - cell.y).abs() < half);
            }
            let expected = naive_median(cell.members.iter().map(|&i| z[i]).collect());
            prop_assert_eq!(cell.value, expected);
        }
    }

    /// Membership lists are strictly ascending.
    #[test]
    fn prop_members_ascending(
        (x, y, z) in sample_set(),
        binsize in 0.05f64..3.0
    ) {
        let grid = griddata(&x, &y, &z, binsize).unwrap();
        for members in grid.membership().as_slice() {
            prop_assert!(members.windows(2).all(|w| w[0] < w[1]));
        }
    }

    /// Grid shape depends only on the coordinate extrema and the bin size.
    #[test]
    fn prop_shape_from_extrema(
        (x, y, z) in sample_set(),
        binsize in 0.05f64..3.0
    ) {
        let grid = griddata(&x, &y, &z, binsize).unwrap();
        let (xmin, xmax, ymin, ymax) = grid.extent().unwrap();
        prop_assert_eq!(grid.x_axis().len(), Axis::spanning(xmin, xmax, binsize).len());
        prop_assert_eq!(grid.y_axis().len(), Axis::spanning(ymin, ymax, binsize).len());
        prop_assert_eq!(grid.shape(), (grid.y_axis().len(), grid.x_axis().len()));
        prop_assert_eq!(grid.x_axis().start(), xmin);
        prop_assert_eq!(grid.y_axis().start(), ymin);
    }

    /// Scan and bucketed strategies produce identical grids.
    #[test]
    fn prop_strategies_agree(
        (x, y, z) in sample_set(),
        binsize in 0.05f64..3.0
    ) {
        let scan = GridBinner::new(binsize).bin_slices(&x, &y, &z).unwrap();
        let bucketed = GridBinner::new(binsize)
            .strategy(BinStrategy::Bucketed)
            .bin_slices(&x, &y, &z)
            .unwrap();
        prop_assert_eq!(scan.membership(), bucketed.membership());
        prop_assert_eq!(scan.counts(), bucketed.counts());
    }

    /// The strategies still agree when coordinates are large enough that
    /// rounding makes the centres uneven or repeated.
    #[test]
    fn prop_strategies_agree_far_from_origin(
        offset in prop::sample::select(vec![-4.5e15, 1e12, 1e15, 3e15, 1e16]),
        points in prop::collection::vec((0.0f64..10.0, 0.0f64..10.0), 1..20),
        binsize in 0.05f64..3.0
    ) {
        let x: Vec<f64> = points.iter().map(|&(dx, _)| offset + dx).collect();
        let y: Vec<f64> = points.iter().map(|&(_, dy)| offset + dy).collect();
        let z = vec![1.0; points.len()];
        let scan = GridBinner::new(binsize).bin_slices(&x, &y, &z).unwrap();
        let bucketed = GridBinner::new(binsize)
            .strategy(BinStrategy::Bucketed)
            .bin_slices(&x, &y, &z)
            .unwrap();
        prop_assert_eq!(scan.membership(), bucketed.membership());
    }

    /// On integer coordinates with a unit bin every sample lands in exactly
    /// one cell, so the counts sum to the sample count.
    #[test]
    fn prop_lattice_samples_counted_once(
        points in prop::collection::vec((-20i32..20, -20i32..20), 1..80)
    ) {
        let x: Vec<f64> = points.iter().map(|&(px, _)| f64::from(px)).collect();
        let y: Vec<f64> = points.iter().map(|&(_, py)| f64::from(py)).collect();
        let z = vec![1.0; points.len()];
        let grid = griddata(&x, &y, &z, 1.0).unwrap();
        prop_assert_eq!(grid.count_summary().total, points.len());
    }

    /// The value range covers exactly the non-empty cells.
    #[test]
    fn prop_value_range_bounds_cells(
        (x, y, z) in sample_set(),
        binsize in 0.05f64..3.0
    ) {
        let grid = griddata(&x, &y, &z, binsize).unwrap();
        if let Some((lo, hi)) = grid.value_range() {
            prop_assert!(lo <= hi);
            for cell in grid.occupied() {
                prop_assert!(cell.value >= lo && cell.value <= hi);
            }
        } else {
            prop_assert_eq!(grid.occupied().count(), 0);
        }
    }
}

#[test]
fn length_mismatch_is_invalid_argument() {
    let err = griddata(&[0.0, 1.0, 2.0], &[0.0, 1.0], &[0.0, 1.0, 2.0], 0.5).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn zero_binsize_is_invalid_argument() {
    let err = griddata(&[0.0], &[0.0], &[0.0], 0.0).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn degenerate_input_single_cell_holds_median() {
    let z = [9.0, 1.0, 5.0];
    let grid = griddata(&[2.0; 3], &[-1.0; 3], &z, 0.3).unwrap();
    assert_eq!(grid.shape(), (1, 1));
    assert_eq!(grid.counts()[(0, 0)], 3);
    assert_eq!(grid.values()[(0, 0)], 5.0);
}
