//! methods::ols — piecewise-regression ("OLS swiping") knee detection.
//!
//! Purpose
//! -------
//! Sweep a pivot across the interior of the curve, fit one least-squares
//! line to the samples up to the pivot and another to the samples from the
//! pivot on, and score the pivot by the combined R² of the two fits. The
//! pivot with the **minimum** combined score is returned.
//!
//! Key behaviors
//! -------------
//! - Each segment's R² is computed two ways: `1 − SSR/SST` and the squared
//!   Pearson correlation between fitted and observed values. The two must
//!   agree within `|a − b| ≤ 1e-8 + 1e-5·|b|`; their mean is used.
//! - Means, variances and covariances come from `statrs::Statistics`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Pivot `i` runs over `1..=n−2`; segments `[0..=i]` and `[i..n−1]` share
//!   the pivot and always hold at least two samples.
//! - A segment with zero total variance is a perfect fit (R² = 1).
//! - Ties resolve to the earliest pivot.
use crate::{
    geometry::argmin,
    methods::{
        errors::{MethodError, MethodResult},
        validation::check_series,
    },
};
use ndarray::{Array1, ArrayView1, s};
use statrs::statistics::Statistics;

/// Absolute part of the R² cross-check tolerance.
pub const R2_ABS_TOL: f64 = 1e-8;

/// Relative part of the R² cross-check tolerance.
pub const R2_REL_TOL: f64 = 1e-5;

/// Knee at the pivot whose two-segment fit explains the least variance.
///
/// # Errors
/// - `MethodError::TooFewPoints` for fewer than 4 samples.
/// - `MethodError::RSquaredMismatch` if the SSR- and correlation-based R²
///   disagree for some segment.
pub fn ols_swiping(x: ArrayView1<f64>, y: ArrayView1<f64>) -> MethodResult<usize> {
    let n = check_series("ols_swiping", x, y, 4)?;
    let scores = (1..n - 1)
        .map(|pivot| {
            let left = checked_r_squared(pivot, x.slice(s![..=pivot]), y.slice(s![..=pivot]))?;
            let right = checked_r_squared(pivot, x.slice(s![pivot..]), y.slice(s![pivot..]))?;
            Ok(left + right)
        })
        .collect::<MethodResult<Array1<f64>>>()?;
    let best = argmin(scores.view())
        .ok_or(MethodError::DegenerateScores { method: "ols_swiping" })?;
    Ok(best + 1)
}

/// Cross-checked R² of the least-squares line through `(x, y)`.
pub fn checked_r_squared(
    pivot: usize, x: ArrayView1<f64>, y: ArrayView1<f64>,
) -> MethodResult<f64> {
    let fit = LineFit::new(x, y);
    let from_ssr = fit.r_squared_ssr(x, y);
    let from_pearson = fit.r_squared_pearson(x, y);
    if (from_ssr - from_pearson).abs() > R2_ABS_TOL + R2_REL_TOL * from_pearson.abs() {
        return Err(MethodError::RSquaredMismatch { pivot, from_ssr, from_pearson });
    }
    Ok(0.5 * (from_ssr + from_pearson))
}

/// Ordinary least-squares line `ŷ = intercept + slope·x`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LineFit {
    intercept: f64,
    slope: f64,
    y_mean: f64,
    y_variance: f64,
}

impl LineFit {
    fn new(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Self {
        let x_mean = x.iter().mean();
        let y_mean = y.iter().mean();
        let x_variance = x.iter().variance();
        let y_variance = y.iter().variance();
        let slope = if x_variance > 0.0 { x.iter().covariance(y.iter()) / x_variance } else { 0.0 };
        Self { intercept: y_mean - slope * x_mean, slope, y_mean, y_variance }
    }

    fn predict(&self, x: ArrayView1<f64>) -> Array1<f64> {
        x.mapv(|v| self.intercept + self.slope * v)
    }

    fn r_squared_ssr(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        if self.y_variance == 0.0 {
            return 1.0;
        }
        let fitted = self.predict(x);
        let ssr: f64 = y.iter().zip(fitted.iter()).map(|(obs, fit)| (obs - fit).powi(2)).sum();
        let sst: f64 = y.iter().map(|obs| (obs - self.y_mean).powi(2)).sum();
        1.0 - ssr / sst
    }

    fn r_squared_pearson(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        if self.y_variance == 0.0 {
            return 1.0;
        }
        let fitted = self.predict(x);
        let fitted_variance = fitted.iter().variance();
        if fitted_variance == 0.0 {
            return 0.0;
        }
        let covariance = fitted.iter().covariance(y.iter());
        covariance.powi(2) / (fitted_variance * self.y_variance)
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
    // - R² on perfect, noisy and flat segments (both formulas agree).
    // - Pivot selection on a small hand-checked curve.
    // - Short-series rejection.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // R² is 1 on exact lines and on constant segments.
    //
    // Given
    // -----
    // - y = 3x + 1 and y ≡ 2 over four samples.
    //
    // Expect
    // ------
    // - Both scores equal 1.
    fn perfect_and_flat_segments_score_one() {
        let x = array![0.0, 1.0, 2.0, 3.0];
        let line = x.mapv(|v| 3.0 * v + 1.0);
        let flat = array![2.0, 2.0, 2.0, 2.0];
        let on_line = checked_r_squared(1, x.view(), line.view()).unwrap();
        let on_flat = checked_r_squared(1, x.view(), flat.view()).unwrap();
        assert_abs_diff_eq!(on_line, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(on_flat, 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Both R² formulas agree on a noisy segment.
    //
    // Given
    // -----
    // - x = [0, 1, 2, 3], y = [0, 2, 1, 3]: slope 0.8, SSR 1.8, SST 5.
    //
    // Expect
    // ------
    // - R² = 0.64.
    fn noisy_segment_matches_hand_computation() {
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = array![0.0, 2.0, 1.0, 3.0];
        let r_squared = checked_r_squared(1, x.view(), y.view()).unwrap();
        assert_abs_diff_eq!(r_squared, 0.64, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The pivot with the lowest combined R² is returned.
    //
    // Given
    // -----
    // - x = [0, 1, 2, 3], y = [0, .45, .9, 1].
    //
    // Expect
    // ------
    // - Pivot 1 (left segment is two points, right segment bends).
    fn lowest_combined_score_wins() {
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = array![0.0, 0.45, 0.9, 1.0];
        assert_eq!(ols_swiping(x.view(), y.view()), Ok(1));
    }

    #[test]
    // Purpose
    // -------
    // Three samples are too few for two segments with an interior pivot.
    //
    // Given
    // -----
    // - Three samples.
    //
    // Expect
    // ------
    // - `TooFewPoints { min: 4 }`.
    fn three_points_are_rejected() {
        let x = array![0.0, 0.5, 1.0];
        assert_eq!(
            ols_swiping(x.view(), x.view()),
            Err(MethodError::TooFewPoints { method: "ols_swiping", n: 3, min: 4 })
        );
    }
}
