//! smoothing — optional cubic smoothing-spline preprocessing.
//!
//! Purpose
//! -------
//! Denoise a normalized curve before knee detection. The noise-sensitive
//! methods (angle, adjacent distance, successive Menger curvature) react to
//! every wiggle in the data; a light smoothing pass trades a little fidelity
//! for a much more stable knee.
//!
//! Key behaviors
//! -------------
//! - [`cubic_spline_smoothing`] solves the penalized regression in closed
//!   form via `nalgebra` Cholesky and LU factorizations.
//! - [`delta_matrix`] / [`weight_matrix`] expose the two operators for
//!   inspection and testing.
//! - Failures are reported as [`SmoothingError`].
//!
//! Downstream usage
//! ----------------
//! - `pipeline` calls [`cubic_spline_smoothing`] between normalization and
//!   orientation classification whenever the smoothing factor is positive.

pub mod errors;
pub mod spline;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SmoothingError, SmoothingResult};
pub use self::spline::{cubic_spline_smoothing, delta_matrix, weight_matrix};
