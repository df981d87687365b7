//! methods — the knee-detection algorithms and their registry.
//!
//! Purpose
//! -------
//! Implement the eight interchangeable knee-finding strategies against a
//! single canonical curve shape, and expose them through a closed enum so
//! callers can select one by name or run all of them in a consensus vote.
//!
//! Key behaviors
//! -------------
//! - Geometric curvature: [`menger_successive`], [`menger_anchored`].
//! - Direction change: [`angle`].
//! - Distances: [`distance`] (from the diagonal) and [`distance_adjacent`]
//!   (from the neighbor chord).
//! - Parametric fit: [`c_method`], an `argmin` Newton–Raphson solve of a
//!   one-parameter curve family.
//! - Thresholded maxima: [`kneedle`].
//! - Piecewise regression: [`ols_swiping`].
//! - [`KneeMethod`] parses names and dispatches; [`cast_ballots`] and
//!   [`majority`] implement the consensus vote.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every method assumes a canonical series: x strictly increasing, x and y
//!   min–max normalized to [0, 1], and the curve increasing and concave.
//!   The `pipeline` module establishes this and undoes the transform on the
//!   returned index.
//! - Methods are pure functions; no method mutates its inputs or keeps
//!   state between calls.
//!
//! Conventions
//! -----------
//! - Every method takes `(x, y)` as `ndarray::ArrayView1<f64>` and returns
//!   `MethodResult<usize>`, a sample index in the canonical series.
//! - Options live in [`MethodOptions`]; only Kneedle and the C-method read
//!   them.
//!
//! Downstream usage
//! ----------------
//! - `pipeline::KneePipeline` resolves a [`KneeMethod`], calls
//!   [`KneeMethod::detect`], and maps [`MethodError`] into `KneeError`.
//!
//! Testing notes
//! -------------
//! - Each method module carries hand-checked cases on small canonical
//!   curves; end-to-end orientation handling lives in the pipeline and
//!   integration tests.

pub mod angle;
pub mod c_method;
pub mod consensus;
pub mod distance;
pub mod errors;
pub mod kneedle;
pub mod menger;
pub mod ols;
pub mod options;
pub mod registry;
mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::angle::angle;
pub use self::c_method::{
    CurveFitOutcome, CurveNewton, KneeCurveFit, c_method, fit_knee_curve, knee_abscissa,
};
pub use self::consensus::{Ballot, cast_ballots, majority};
pub use self::distance::{distance, distance_adjacent};
pub use self::errors::{MethodError, MethodResult};
pub use self::kneedle::kneedle;
pub use self::menger::{menger_anchored, menger_successive};
pub use self::ols::{checked_r_squared, ols_swiping};
pub use self::options::{CMethodOptions, KneedleOptions, MethodOptions};
pub use self::registry::KneeMethod;
