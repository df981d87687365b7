//! methods::menger — Menger-curvature knee detection.
//!
//! Purpose
//! -------
//! Score sample triples by their Menger curvature (the reciprocal radius of
//! the circle through the three points) and report the middle sample of the
//! most curved triple.
//!
//! Key behaviors
//! -------------
//! - [`menger_successive`] slides a stride-1 window of three consecutive
//!   samples along the curve. It reacts to local bends and is therefore
//!   sensitive to noise.
//! - [`menger_anchored`] pins the first and last sample and sweeps the middle
//!   one over every interior index. The triple always spans the whole curve,
//!   which makes this variant robust to local noise.
//!
//! Invariants & assumptions
//! ------------------------
//! - The series is canonical (x strictly increasing), so no two vertices of a
//!   triple coincide and the curvature is always finite.
//! - Both variants return `argmax + 1`: score row `r` belongs to sample
//!   `r + 1` (the window middle).
use crate::{
    geometry::{Triangle, anchored, menger_curvature, windowed},
    methods::{
        errors::MethodResult,
        validation::{best_score, check_series},
    },
};
use ndarray::{Array1, Array2, ArrayView1};

/// Knee from consecutive triples `(i, i+1, i+2)`.
///
/// # Errors
/// - `MethodError::TooFewPoints` when fewer than 3 samples are given.
/// - `MethodError::LengthMismatch` when `x` and `y` differ in length.
pub fn menger_successive(x: ArrayView1<f64>, y: ArrayView1<f64>) -> MethodResult<usize> {
    let n = check_series("menger_successive", x, y, 3)?;
    let scores = curvature_scores(x, y, &windowed(n, 3, 1, 1));
    Ok(best_score("menger_successive", scores.view())? + 1)
}

/// Knee from anchored triples `(0, i, n−1)`.
///
/// # Errors
/// - `MethodError::TooFewPoints` when fewer than 3 samples are given.
/// - `MethodError::LengthMismatch` when `x` and `y` differ in length.
pub fn menger_anchored(x: ArrayView1<f64>, y: ArrayView1<f64>) -> MethodResult<usize> {
    let n = check_series("menger_anchored", x, y, 3)?;
    let scores = curvature_scores(x, y, &anchored(n));
    Ok(best_score("menger_anchored", scores.view())? + 1)
}

fn curvature_scores(
    x: ArrayView1<f64>, y: ArrayView1<f64>, windows: &Array2<usize>,
) -> Array1<f64> {
    windows
        .rows()
        .into_iter()
        .map(|idx| {
            let triangle: Triangle =
                [[x[idx[0]], y[idx[0]]], [x[idx[1]], y[idx[1]]], [x[idx[2]], y[idx[2]]]];
            menger_curvature(&triangle)
        })
        .collect()
}
