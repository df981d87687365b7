//! Orthogonal distance of a point from a line through the origin.
//!
//! For a point `p` and a direction `d`, the distance of `p` from the line
//! spanned by `d` is `|det([p; d])| / ‖d‖`. [`projection_distances`] applies
//! this to every row pair of two `m×2` matrices in one pass, which is how the
//! adjacent-distance method scores all interior windows at once.
use nalgebra::Matrix2;
use ndarray::{Array1, ArrayView2, Zip};

/// Guard added to the chord length so a near-zero chord cannot divide by zero.
pub const PROJECTION_EPS: f64 = 1e-12;

/// Row-wise projection distances of `points` from the lines spanned by `directions`.
///
/// # Parameters
/// - `points`: `m×2` matrix; row `r` is the point being projected.
/// - `directions`: `m×2` matrix; row `r` spans the line through the origin.
///
/// # Returns
/// Length-`m` vector with `|det([p_r; d_r])| / (‖d_r‖ + PROJECTION_EPS)`.
///
/// # Panics
/// - If the two matrices do not share the same shape or do not have two
///   columns (programmer error; shapes are fixed by the caller).
pub fn projection_distances(points: ArrayView2<f64>, directions: ArrayView2<f64>) -> Array1<f64> {
    assert_eq!(points.dim(), directions.dim(), "points and directions must share a shape");
    assert_eq!(points.ncols(), 2, "expected 2-D coordinates");
    Zip::from(points.rows()).and(directions.rows()).map_collect(|p, d| {
        let determinant = Matrix2::new(p[0], p[1], d[0], d[1]).determinant();
        let chord = d[0].hypot(d[1]);
        determinant.abs() / (chord + PROJECTION_EPS)
    })
}
