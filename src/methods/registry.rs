//! methods::registry — closed set of detection methods and their dispatch.
//!
//! Purpose
//! -------
//! Name every detection method once, parse it from the snake_case strings
//! callers use, and dispatch a canonical series to the matching function.
//!
//! Conventions
//! -----------
//! - Names are snake_case and parse case-insensitively; surrounding
//!   whitespace is ignored.
//! - [`KneeMethod::ALL`] lists the methods alphabetically; consensus voting
//!   walks it in this order, so it also fixes the first-seen tie break.
use crate::methods::{
    angle::angle,
    c_method::c_method,
    distance::{distance, distance_adjacent},
    errors::{MethodError, MethodResult},
    kneedle::kneedle,
    menger::{menger_anchored, menger_successive},
    ols::ols_swiping,
    options::MethodOptions,
};
use ndarray::ArrayView1;
use std::{fmt, str::FromStr};

/// Knee-detection method.
///
/// Every variant is a pure function of a canonical (normalized, increasing
/// concave) series and the shared [`MethodOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KneeMethod {
    Angle,
    CMethod,
    Distance,
    DistanceAdjacent,
    Kneedle,
    MengerAnchored,
    MengerSuccessive,
    OlsSwiping,
}

impl KneeMethod {
    /// All methods, alphabetically by name.
    pub const ALL: [KneeMethod; 8] = [
        KneeMethod::Angle,
        KneeMethod::CMethod,
        KneeMethod::Distance,
        KneeMethod::DistanceAdjacent,
        KneeMethod::Kneedle,
        KneeMethod::MengerAnchored,
        KneeMethod::MengerSuccessive,
        KneeMethod::OlsSwiping,
    ];

    /// Snake_case name accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            KneeMethod::Angle => "angle",
            KneeMethod::CMethod => "c_method",
            KneeMethod::Distance => "distance",
            KneeMethod::DistanceAdjacent => "distance_adjacent",
            KneeMethod::Kneedle => "kneedle",
            KneeMethod::MengerAnchored => "menger_anchored",
            KneeMethod::MengerSuccessive => "menger_successive",
            KneeMethod::OlsSwiping => "ols_swiping",
        }
    }

    /// Run this method on a canonical series.
    ///
    /// # Errors
    /// Whatever the selected method reports; see the individual modules.
    pub fn detect(
        &self, x: ArrayView1<f64>, y: ArrayView1<f64>, opts: &MethodOptions,
    ) -> MethodResult<usize> {
        match self {
            KneeMethod::Angle => angle(x, y),
            KneeMethod::CMethod => c_method(x, y, &opts.c_method),
            KneeMethod::Distance => distance(x, y),
            KneeMethod::DistanceAdjacent => distance_adjacent(x, y),
            KneeMethod::Kneedle => kneedle(x, y, &opts.kneedle),
            KneeMethod::MengerAnchored => menger_anchored(x, y),
            KneeMethod::MengerSuccessive => menger_successive(x, y),
            KneeMethod::OlsSwiping => ols_swiping(x, y),
        }
    }
}

impl fmt::Display for KneeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KneeMethod {
    type Err = MethodError;

    /// Parse a method from its snake_case name (case-insensitive).
    ///
    /// Any other value returns `MethodError::UnknownMethod`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        KneeMethod::ALL.into_iter().find(|method| method.name() == wanted).ok_or_else(|| {
            MethodError::UnknownMethod {
                name: s.to_string(),
                reason: "Valid options are angle, c_method, distance, distance_adjacent, \
                         kneedle, menger_anchored, menger_successive, ols_swiping.",
            }
        })
    }
}
