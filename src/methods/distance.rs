//! methods::distance — distance-based knee detection.
//!
//! Purpose
//! -------
//! Two knees derived from point-to-line distances on the canonical curve.
//!
//! Key behaviors
//! -------------
//! - [`distance`]: the sample farthest (vertically) from the diagonal
//!   `y = x` joining the endpoints of the normalized curve, `argmax |y − x|`.
//!   Range `[0, n−1]`.
//! - [`distance_adjacent`]: for every interior sample, the orthogonal
//!   distance from the chord joining its two neighbors. All windows are
//!   scored in one pass: the window is translated so the first neighbor sits
//!   at the origin, then [`projection_distances`] evaluates
//!   `|det([p; d])| / (‖d‖ + ε)`. Returns `argmax + 1`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are canonical (normalized, increasing concave). `distance`
//!   relies on the endpoints being `(0, 0)` and `(1, 1)`.
use crate::{
    geometry::{projection_distances, windowed},
    methods::{
        errors::MethodResult,
        validation::{best_score, check_series},
    },
};
use ndarray::{Array2, ArrayView1, Zip};

/// Knee farthest from the diagonal.
///
/// # Errors
/// - `MethodError::TooFewPoints` for fewer than 3 samples.
/// - `MethodError::LengthMismatch` when `x` and `y` differ in length.
pub fn distance(x: ArrayView1<f64>, y: ArrayView1<f64>) -> MethodResult<usize> {
    check_series("distance", x, y, 3)?;
    let gaps = Zip::from(&y).and(&x).map_collect(|&y, &x| (y - x).abs());
    best_score("distance", gaps.view())
}

/// Knee farthest from the chord of its neighbors.
///
/// # Errors
/// - `MethodError::TooFewPoints` for fewer than 3 samples.
/// - `MethodError::LengthMismatch` when `x` and `y` differ in length.
pub fn distance_adjacent(x: ArrayView1<f64>, y: ArrayView1<f64>) -> MethodResult<usize> {
    let n = check_series("distance_adjacent", x, y, 3)?;
    let windows = windowed(n, 3, 1, 1);
    let rows = windows.nrows();
    // Row r: middle sample relative to the first neighbor.
    let points = Array2::from_shape_fn((rows, 2), |(r, c)| {
        let (first, middle) = (windows[[r, 0]], windows[[r, 1]]);
        if c == 0 { x[middle] - x[first] } else { y[middle] - y[first] }
    });
    // Row r: second neighbor relative to the first neighbor.
    let directions = Array2::from_shape_fn((rows, 2), |(r, c)| {
        let (first, last) = (windows[[r, 0]], windows[[r, 2]]);
        if c == 0 { x[last] - x[first] } else { y[last] - y[first] }
    });
    let scores = projection_distances(points.view(), directions.view());
    Ok(best_score("distance_adjacent", scores.view())? + 1)
}
