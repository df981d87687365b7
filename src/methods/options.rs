//! methods::options — tuning knobs for the parametric detection methods.
//!
//! Only two methods take parameters: Kneedle (sensitivity) and the C-method
//! (Newton step tolerance, iteration cap, verbosity). Both option structs
//! validate in `new` and carry documented defaults; [`MethodOptions`] bundles
//! them so the registry can hand every method the same argument.
use crate::methods::errors::{MethodError, MethodResult};

/// Default Kneedle sensitivity `S`.
pub const DEFAULT_SENSITIVITY: f64 = 1.0;

/// Default stopping tolerance on `|c_{k+1} − c_k|`.
pub const DEFAULT_C_TOL: f64 = 1e-5;

/// Default C-method iteration cap.
pub const DEFAULT_C_MAX_ITER: usize = 10_000;

/// Kneedle configuration.
///
/// - `sensitivity`: how far the difference curve must drop below a local
///   maximum (in units of `1/(n−1)`) before that maximum counts as a knee.
///   Larger values are more conservative. Default `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KneedleOptions {
    pub sensitivity: f64,
}

impl KneedleOptions {
    /// Validate and build Kneedle options.
    ///
    /// # Errors
    /// - `MethodError::InvalidSensitivity` if `sensitivity` is negative or
    ///   non-finite.
    pub fn new(sensitivity: f64) -> MethodResult<Self> {
        if !sensitivity.is_finite() {
            return Err(MethodError::InvalidSensitivity {
                value: sensitivity,
                reason: "Sensitivity must be finite.",
            });
        }
        if sensitivity < 0.0 {
            return Err(MethodError::InvalidSensitivity {
                value: sensitivity,
                reason: "Sensitivity must be non-negative.",
            });
        }
        Ok(Self { sensitivity })
    }
}

impl Default for KneedleOptions {
    fn default() -> Self {
        Self { sensitivity: DEFAULT_SENSITIVITY }
    }
}

/// C-method (Newton–Raphson curve fit) configuration.
///
/// Fields:
/// - `tol`: stop once successive shape parameters differ by less than this.
/// - `max_iter`: hard cap on Newton steps; hitting it is a
///   `MethodError::NotConverged`.
/// - `verbose`: with the `obs_slog` feature, attach a terminal observer and
///   print the initial state before iterating. Ignored otherwise.
///
/// Default: `tol = 1e-5`, `max_iter = 10_000`, `verbose = false`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CMethodOptions {
    pub tol: f64,
    pub max_iter: usize,
    pub verbose: bool,
}

impl CMethodOptions {
    /// Validate and build C-method options.
    ///
    /// # Errors
    /// - `MethodError::InvalidTolerance` if `tol` is not finite and positive.
    /// - `MethodError::InvalidMaxIter` if `max_iter == 0`.
    pub fn new(tol: f64, max_iter: usize, verbose: bool) -> MethodResult<Self> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(MethodError::InvalidTolerance {
                tol,
                reason: "Tolerance must be finite and greater than zero.",
            });
        }
        if max_iter == 0 {
            return Err(MethodError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { tol, max_iter, verbose })
    }
}

impl Default for CMethodOptions {
    fn default() -> Self {
        Self { tol: DEFAULT_C_TOL, max_iter: DEFAULT_C_MAX_ITER, verbose: false }
    }
}

/// Per-method options handed to every detection method by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MethodOptions {
    pub kneedle: KneedleOptions,
    pub c_method: CMethodOptions,
}

impl MethodOptions {
    pub fn new(kneedle: KneedleOptions, c_method: CMethodOptions) -> Self {
        Self { kneedle, c_method }
    }
}
