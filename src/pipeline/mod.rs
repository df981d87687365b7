//! pipeline — input normalization, orientation handling and entry points.
//!
//! Purpose
//! -------
//! Bring an arbitrary point set into the single shape every detection
//! method assumes (increasing, concave, inside the unit square), run the
//! selected method, and translate its answer back to the caller's data.
//!
//! Key behaviors
//! -------------
//! - [`input`] accepts paired axes, a bare y series, or a 2-D array.
//! - [`series`] sorts by x, checks monotonicity and min–max normalizes.
//! - [`orientation`] classifies the curve into one of four [`KneeType`]s and
//!   mirrors it into the canonical shape.
//! - [`prepare`] composes the stages into [`KneePipeline`] and provides
//!   [`find_knee`] and [`find_knee_consensus`].
//! - [`errors`] defines [`KneeError`], the error type of the public surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - Series reaching a method have at least [`input::MIN_POINTS`] finite
//!   samples with strictly increasing x.
//! - Indices returned to callers refer to the series sorted by x.
//!
//! Downstream usage
//! ----------------
//! - Most callers need only [`find_knee`] or [`KneePipeline::run`].
//! - The stage functions are public so each can be tested or reused alone.
pub mod errors;
pub mod input;
pub mod options;
pub mod orientation;
pub mod prepare;
pub mod series;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{KneeError, KneeResult};
pub use self::input::{MIN_POINTS, PointInput};
pub use self::options::KneeOptions;
pub use self::orientation::KneeType;
pub use self::prepare::{
    ConsensusOutcome, KneePipeline, KneeReport, PreparedSeries, find_knee, find_knee_consensus,
    order_points, prepare, smooth,
};
pub use self::series::{PointSeries, normalize, require_increasing_x, sort_by_x};
