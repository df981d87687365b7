//! geometry — index windows, triangle measures, and projection distances.
//!
//! Purpose
//! -------
//! Provide the small, allocation-light geometric primitives that every
//! knee-detection method is assembled from: index windows over a series,
//! triangle areas and edge lengths for curvature, orthogonal projection
//! distances for the adjacent-distance method, and first-occurrence
//! extremum search over score vectors.
//!
//! Key behaviors
//! -------------
//! - Generate windowed index matrices (`windowed`) with stride and dilation,
//!   and anchored index triples (`anchored`) that pin the first and last
//!   sample while sweeping the middle one.
//! - Compute twice the unsigned area of a triangle from the 3×3 homogeneous
//!   determinant, squared pairwise edge lengths, and the Menger curvature
//!   built from both.
//! - Compute point-to-line projection distances for many (point, direction)
//!   pairs at once via `ndarray::Zip`.
//! - Locate the first maximum / minimum of a score vector, skipping `NaN`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Coordinates are finite `f64`; validation happens upstream in the
//!   pipeline, so these helpers never return errors.
//! - Index matrices are row-major: each row is one window, each column one
//!   position inside the window.
//!
//! Conventions
//! -----------
//! - Determinants are evaluated with `nalgebra` fixed-size matrices
//!   (`Matrix2`, `Matrix3`); series-level work uses `ndarray`.
//! - "Double area" is used throughout instead of the area itself; the
//!   factor of two cancels inside the curvature formula.
//!
//! Downstream usage
//! ----------------
//! - `methods::menger` windows the series with [`windowed`] / [`anchored`]
//!   and scores each triple with [`menger_curvature`].
//! - `methods::distance` uses [`projection_distances`] for the
//!   adjacent-distance method.
//! - All methods reduce their score vectors with [`argmax`] / [`argmin`].
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover the hand-computed window grids,
//!   triangle areas (including the collinear case), edge lengths, and
//!   projection distances for axis-aligned and diagonal chords.

pub mod extrema;
pub mod projection;
pub mod triangle;
pub mod windows;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::extrema::{argmax, argmin};
pub use self::projection::{PROJECTION_EPS, projection_distances};
pub use self::triangle::{Triangle, double_triangle_area, menger_curvature, squared_edge_lengths};
pub use self::windows::{anchored, windowed};
