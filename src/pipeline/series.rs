//! pipeline::series — the point series and its ordering and scaling stages.
//!
//! Purpose
//! -------
//! Hold a validated `(x, y)` series and provide the stages that bring it
//! into the unit square: stable sorting by x, the strictly-increasing check,
//! and independent min–max normalization of both axes.
//!
//! Invariants & assumptions
//! ------------------------
//! - A [`PointSeries`] always has equal-length, finite axes of at least
//!   [`crate::pipeline::input::MIN_POINTS`] samples; [`PointSeries::new`]
//!   enforces this.
//! - Every stage returns a new series; no stage mutates its input.
//! - After [`normalize`], both axes span exactly `[0, 1]`.
use crate::pipeline::{
    errors::{KneeError, KneeResult},
    input::PointInput,
};
use ndarray::{Array1, ArrayView1};

/// Validated, finite point series.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSeries {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl PointSeries {
    /// Validate a pair of axes.
    ///
    /// # Errors
    /// Same as [`PointInput::into_columns`].
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> KneeResult<Self> {
        Self::parse(PointInput::Paired { x, y })
    }

    /// Parse any accepted input shape.
    pub fn parse(input: impl Into<PointInput>) -> KneeResult<Self> {
        let (x, y) = input.into().into_columns()?;
        Ok(Self { x, y })
    }

    /// Build from axes already known to be valid (stage outputs).
    pub(crate) fn from_parts(x: Array1<f64>, y: Array1<f64>) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Coordinates of sample `index`.
    pub fn point(&self, index: usize) -> (f64, f64) {
        (self.x[index], self.y[index])
    }
}

/// Stable sort by ascending x.
///
/// Returns the sorted series and the permutation `order` with
/// `sorted[i] = series[order[i]]`.
pub fn sort_by_x(series: &PointSeries) -> (PointSeries, Vec<usize>) {
    let mut order: Vec<usize> = (0..series.len()).collect();
    order.sort_by(|&a, &b| series.x[a].total_cmp(&series.x[b]));
    let x = order.iter().map(|&i| series.x[i]).collect();
    let y = order.iter().map(|&i| series.y[i]).collect();
    (PointSeries::from_parts(x, y), order)
}

/// Check that x is strictly increasing.
///
/// `sorted` selects the error: after an explicit sort a repeat can only be
/// a duplicate abscissa, without one any step down is reported as such.
///
/// # Errors
/// - `KneeError::DuplicateX` (sorted) or `KneeError::XNotIncreasing`
///   (unsorted) at the first offending index.
pub fn require_increasing_x(series: &PointSeries, sorted: bool) -> KneeResult<()> {
    let offending = series.x.windows(2).into_iter().position(|pair| pair[1] <= pair[0]);
    match offending {
        Some(i) if sorted => Err(KneeError::DuplicateX { index: i + 1 }),
        Some(i) => Err(KneeError::XNotIncreasing { index: i + 1 }),
        None => Ok(()),
    }
}

/// Min–max scale both axes to `[0, 1]`.
///
/// # Errors
/// - `KneeError::ConstantAxis` if either axis has zero range.
pub fn normalize(series: &PointSeries) -> KneeResult<PointSeries> {
    Ok(PointSeries::from_parts(unit_scale("x", series.x())?, unit_scale("y", series.y())?))
}

fn unit_scale(axis: &'static str, values: ArrayView1<f64>) -> KneeResult<Array1<f64>> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;
    if !(range > 0.0) || !range.is_finite() {
        return Err(KneeError::ConstantAxis { axis });
    }
    Ok(values.mapv(|v| (v - lo) / range))
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
    // - Stable sorting and its permutation.
    // - Duplicate and non-increasing abscissae.
    // - Normalization range and constant axes.
    // -------------------------------------------------------------------------

    fn series(x: Array1<f64>, y: Array1<f64>) -> PointSeries {
        PointSeries::new(x, y).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Sorting reorders both axes together and reports the permutation.
    //
    // Given
    // -----
    // - x = [3, 0, 2, 1], y = [30, 0, 20, 10].
    //
    // Expect
    // ------
    // - Sorted x = [0, 1, 2, 3], y follows, order = [1, 3, 2, 0].
    fn sort_carries_y_and_permutation() {
        let (sorted, order) =
            sort_by_x(&series(array![3.0, 0.0, 2.0, 1.0], array![30.0, 0.0, 20.0, 10.0]));
        assert_eq!(sorted.x(), array![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(sorted.y(), array![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(order, vec![1, 3, 2, 0]);
    }

    #[test]
    // Purpose
    // -------
    // Repeated and decreasing abscissae produce the matching error.
    //
    // Given
    // -----
    // - Sorted x with a repeat at index 2; unsorted x stepping down at 3.
    //
    // Expect
    // ------
    // - DuplicateX { 2 } and XNotIncreasing { 3 }.
    fn non_increasing_x_is_reported() {
        let y = array![0.0, 1.0, 2.0, 3.0];
        let repeated = series(array![0.0, 1.0, 1.0, 2.0], y.clone());
        assert_eq!(require_increasing_x(&repeated, true), Err(KneeError::DuplicateX { index: 2 }));
        let shuffled = series(array![0.0, 1.0, 3.0, 2.0], y);
        assert_eq!(
            require_increasing_x(&shuffled, false),
            Err(KneeError::XNotIncreasing { index: 3 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Both axes land exactly on [0, 1].
    //
    // Given
    // -----
    // - x = [10, 20, 30, 50], y = [-4, 0, 2, 6].
    //
    // Expect
    // ------
    // - min 0, max 1 on each axis; interior values scaled affinely.
    fn normalize_spans_unit_interval() {
        let unit = normalize(&series(array![10.0, 20.0, 30.0, 50.0], array![-4.0, 0.0, 2.0, 6.0]))
            .unwrap();
        assert_abs_diff_eq!(unit.x()[0], 0.0);
        assert_abs_diff_eq!(unit.x()[3], 1.0);
        assert_abs_diff_eq!(unit.x()[1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(unit.y()[0], 0.0);
        assert_abs_diff_eq!(unit.y()[3], 1.0);
        assert_abs_diff_eq!(unit.y()[2], 0.6, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A flat axis is a defined failure, never NaN.
    //
    // Given
    // -----
    // - y constant at 5.
    //
    // Expect
    // ------
    // - ConstantAxis { axis: "y" }.
    fn constant_axis_is_rejected() {
        let flat = series(array![0.0, 1.0, 2.0, 3.0], array![5.0, 5.0, 5.0, 5.0]);
        assert_eq!(normalize(&flat), Err(KneeError::ConstantAxis { axis: "y" }));
    }
}
