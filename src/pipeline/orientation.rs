//! pipeline::orientation — curve orientation classes and the canonical mirror.
//!
//! Purpose
//! -------
//! Every detection method is written against one shape: an increasing,
//! concave curve in the unit square. This module classifies a normalized
//! curve into one of four orientation classes, mirrors it into the canonical
//! shape, and maps the method's answer back.
//!
//! Key behaviors
//! -------------
//! - [`KneeType::classify`] looks at the first two and last two ordinates:
//!   `inc = y[n−1] > y[n−2]`, `explosive = |y[n−1] − y[n−2]| > |y[1] − y[0]|`,
//!   and uses the code `2·explosive + inc`.
//! - [`KneeType::canonicalize`] applies the class's mirror:
//!
//!   | code | class               | y                | x             |
//!   |------|---------------------|------------------|---------------|
//!   | 0    | DECREASING_CONVEX   | `1 − y`          | unchanged     |
//!   | 1    | INCREASING_CONCAVE  | unchanged        | unchanged     |
//!   | 2    | DECREASING_CONCAVE  | `rev(y)`         | `1 − rev(x)`  |
//!   | 3    | INCREASING_CONVEX   | `1 − rev(y)`     | `1 − rev(x)`  |
//!
//! - [`KneeType::restore_index`] undoes the horizontal mirror on an index:
//!   `n − 1 − i` for classes 2 and 3, identity otherwise.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are normalized to `[0, 1]` (up to smoothing), so `1 − v`
//!   preserves the range and `1 − rev(x)` keeps x strictly increasing.
use crate::pipeline::series::PointSeries;
use ndarray::{Array1, ArrayView1, s};
use std::fmt;

/// Orientation class of a monotone curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KneeType {
    DecreasingConvex,
    IncreasingConcave,
    DecreasingConcave,
    IncreasingConvex,
}

impl KneeType {
    /// Classify from the first two and last two ordinates.
    ///
    /// # Panics
    /// - If `y` has fewer than 2 samples (the pipeline guarantees 4).
    pub fn classify(y: ArrayView1<f64>) -> Self {
        let n = y.len();
        assert!(n >= 2, "classification needs at least two ordinates");
        let tail = y[n - 1] - y[n - 2];
        let head = y[1] - y[0];
        let inc = tail > 0.0;
        let explosive = tail.abs() > head.abs();
        Self::from_code(2 * u8::from(explosive) + u8::from(inc))
    }

    fn from_code(code: u8) -> Self {
        match code {
            0 => KneeType::DecreasingConvex,
            1 => KneeType::IncreasingConcave,
            2 => KneeType::DecreasingConcave,
            _ => KneeType::IncreasingConvex,
        }
    }

    /// `2·explosive + inc`.
    pub fn code(&self) -> u8 {
        match self {
            KneeType::DecreasingConvex => 0,
            KneeType::IncreasingConcave => 1,
            KneeType::DecreasingConcave => 2,
            KneeType::IncreasingConvex => 3,
        }
    }

    /// Whether the canonical transform reverses the sample order.
    pub fn is_mirrored(&self) -> bool {
        matches!(self, KneeType::DecreasingConcave | KneeType::IncreasingConvex)
    }

    /// Mirror a normalized series into the increasing concave shape.
    pub fn canonicalize(&self, series: &PointSeries) -> PointSeries {
        let (x, y) = (series.x(), series.y());
        let (x_rev, y_rev) = (x.slice(s![..;-1]), y.slice(s![..;-1]));
        let (x, y): (Array1<f64>, Array1<f64>) = match self {
            KneeType::IncreasingConcave => (x.to_owned(), y.to_owned()),
            KneeType::DecreasingConvex => (x.to_owned(), flip(y)),
            KneeType::DecreasingConcave => (flip(x_rev), y_rev.to_owned()),
            KneeType::IncreasingConvex => (flip(x_rev), flip(y_rev)),
        };
        PointSeries::from_parts(x, y)
    }

    /// Map a canonical-series index back to the series that was classified.
    pub fn restore_index(&self, index: usize, n: usize) -> usize {
        if self.is_mirrored() { n - 1 - index } else { index }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KneeType::DecreasingConvex => "decreasing_convex",
            KneeType::IncreasingConcave => "increasing_concave",
            KneeType::DecreasingConcave => "decreasing_concave",
            KneeType::IncreasingConvex => "increasing_convex",
        }
    }
}

fn flip(values: ArrayView1<f64>) -> Array1<f64> {
    values.mapv(|v| 1.0 - v)
}

impl fmt::Display for KneeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Classification of all four orientation classes.
    // - The canonical mirror producing an increasing concave curve with
    //   strictly increasing x.
    // - Index restoration for mirrored and unmirrored classes.
    // -------------------------------------------------------------------------

    fn unit_x() -> Array1<f64> {
        Array1::linspace(0.0, 1.0, 5)
    }

    #[test]
    // Purpose
    // -------
    // Each of the four shapes maps to its class.
    //
    // Given
    // -----
    // - Concave rising, convex rising, concave falling, convex falling.
    //
    // Expect
    // ------
    // - Codes 1, 3, 2, 0.
    fn classify_all_four_shapes() {
        let concave_up = array![0.0, 0.6, 0.8, 0.9, 1.0];
        let convex_up = array![0.0, 0.1, 0.2, 0.4, 1.0];
        let concave_down = array![1.0, 0.9, 0.8, 0.6, 0.0];
        let convex_down = array![1.0, 0.4, 0.2, 0.1, 0.0];
        assert_eq!(KneeType::classify(concave_up.view()), KneeType::IncreasingConcave);
        assert_eq!(KneeType::classify(convex_up.view()), KneeType::IncreasingConvex);
        assert_eq!(KneeType::classify(concave_down.view()), KneeType::DecreasingConcave);
        assert_eq!(KneeType::classify(convex_down.view()), KneeType::DecreasingConvex);
    }

    #[test]
    // Purpose
    // -------
    // Every class mirrors to the canonical shape with increasing x.
    //
    // Given
    // -----
    // - The four shapes above on a uniform grid.
    //
    // Expect
    // ------
    // - The canonical series classifies as increasing concave, starts at
    //   (0, 0), ends at (1, 1), and has strictly increasing x.
    fn canonicalize_yields_increasing_concave() {
        let shapes = [
            array![0.0, 0.6, 0.8, 0.9, 1.0],
            array![0.0, 0.1, 0.2, 0.4, 1.0],
            array![1.0, 0.9, 0.8, 0.6, 0.0],
            array![1.0, 0.4, 0.2, 0.1, 0.0],
        ];
        for y in shapes {
            let series = PointSeries::new(unit_x(), y).unwrap();
            let knee_type = KneeType::classify(series.y());
            let canonical = knee_type.canonicalize(&series);
            assert_eq!(KneeType::classify(canonical.y()), KneeType::IncreasingConcave);
            assert_abs_diff_eq!(canonical.point(0).0, 0.0);
            assert_abs_diff_eq!(canonical.point(0).1, 0.0);
            assert_abs_diff_eq!(canonical.point(4).0, 1.0);
            assert_abs_diff_eq!(canonical.point(4).1, 1.0);
            assert!(canonical.x().windows(2).into_iter().all(|w| w[1] > w[0]));
        }
    }

    #[test]
    // Purpose
    // -------
    // Mirrored classes reverse indices, the others keep them.
    //
    // Given
    // -----
    // - Index 1 in a 5-point series.
    //
    // Expect
    // ------
    // - 3 for classes 2 and 3, 1 for classes 0 and 1.
    fn restore_index_reverses_mirrored_classes() {
        assert_eq!(KneeType::IncreasingConvex.restore_index(1, 5), 3);
        assert_eq!(KneeType::DecreasingConcave.restore_index(1, 5), 3);
        assert_eq!(KneeType::IncreasingConcave.restore_index(1, 5), 1);
        assert_eq!(KneeType::DecreasingConvex.restore_index(1, 5), 1);
    }

    #[test]
    // Purpose
    // -------
    // Horizontal mirrors reflect x as well, so non-uniform spacing is
    // reversed rather than kept in place.
    //
    // Given
    // -----
    // - x = [0, 0.1, 0.3, 0.6, 1]; y falling concave, rising convex and
    //   falling convex.
    //
    // Expect
    // ------
    // - x = [0, 0.4, 0.7, 0.9, 1] for the mirrored classes; x unchanged for
    //   the vertical-only mirror.
    fn mirrored_classes_reflect_nonuniform_x() {
        let x = array![0.0, 0.1, 0.3, 0.6, 1.0];
        let reflected = array![0.0, 0.4, 0.7, 0.9, 1.0];
        let cases = [
            (array![1.0, 0.9, 0.8, 0.6, 0.0], KneeType::DecreasingConcave, &reflected),
            (array![0.0, 0.1, 0.2, 0.4, 1.0], KneeType::IncreasingConvex, &reflected),
            (array![1.0, 0.4, 0.2, 0.1, 0.0], KneeType::DecreasingConvex, &x),
        ];
        for (y, knee_type, expected_x) in cases {
            let series = PointSeries::new(x.clone(), y).unwrap();
            assert_eq!(KneeType::classify(series.y()), knee_type);
            let canonical = knee_type.canonicalize(&series);
            for (got, want) in canonical.x().iter().zip(expected_x.iter()) {
                assert_abs_diff_eq!(*got, *want, epsilon = 1e-12);
            }
        }
    }
}
