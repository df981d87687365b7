//! pipeline::errors — crate-level error type for knee detection.
//!
//! Purpose
//! -------
//! Provide the single error enum returned by the public entry points.
//! Lower layers keep their own enums (`SmoothingError`, `MethodError`);
//! this module folds them into [`KneeError`] via `From`, so `?` works across
//! the whole pipeline.
//!
//! Key behaviors
//! -------------
//! - Group failures into input-shape, degenerate-input, numerical,
//!   unknown-method, no-knee and consensus categories.
//! - Convert into a Python `ValueError` behind the `python-bindings`
//!   feature.
//!
//! Conventions
//! -----------
//! - `axis` payloads are `"x"` or `"y"`.
//! - `stage` payloads name the pipeline stage or linear system that failed.
use crate::{methods::errors::MethodError, smoothing::errors::SmoothingError};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for the knee-detection pipeline.
pub type KneeResult<T> = Result<T, KneeError>;

#[derive(Debug, Clone, PartialEq)]
pub enum KneeError {
    // ---- Input shape ----
    /// Fewer samples than the pipeline or method requires.
    TooFewPoints { n: usize, min: usize },
    /// Paired inputs with different lengths.
    LengthMismatch { x_len: usize, y_len: usize },
    /// A 2-D input that is not 2×n or n×2 after squeezing.
    BadMatrixShape { rows: usize, cols: usize },
    /// NaN or infinite coordinate.
    NonFiniteValue { axis: &'static str, index: usize, value: f64 },

    // ---- Degenerate input ----
    /// All values on one axis are equal; min–max scaling is undefined.
    ConstantAxis { axis: &'static str },
    /// Two samples share an abscissa after sorting.
    DuplicateX { index: usize },
    /// Sorting disabled and `x[index] <= x[index - 1]`.
    XNotIncreasing { index: usize },
    /// Smoothing factor negative or non-finite.
    InvalidSmoothing { value: f64 },
    /// Kneedle sensitivity negative or non-finite.
    InvalidSensitivity { value: f64 },
    /// C-method tolerance not finite and positive.
    InvalidTolerance { tol: f64 },
    /// C-method iteration cap of zero.
    InvalidMaxIter { max_iter: usize },

    // ---- Numerical ----
    /// A linear system could not be factorized.
    SingularSystem { stage: &'static str },
    /// A computation produced a non-finite value.
    NonFiniteResult { stage: &'static str, index: usize },
    /// The C-method iteration cap was reached.
    NotConverged { iterations: u64, last_step: f64 },
    /// The C-method iteration broke down (flat second derivative, overflow).
    Diverged { text: String },
    /// OLS swiping R² cross-check failed.
    RSquaredMismatch { pivot: usize, from_ssr: f64, from_pearson: f64 },
    /// Scores were all NaN.
    DegenerateScores { method: &'static str },
    /// Any other optimizer backend failure.
    Backend { text: String },

    // ---- Method selection ----
    /// Method name did not parse.
    UnknownMethod { name: String },

    // ---- Outcome ----
    /// The method ran but found no knee.
    NoKneeFound { method: &'static str, reason: &'static str },
    /// Every method failed in a consensus run.
    NoConsensus { attempted: usize },
}

impl std::error::Error for KneeError {}

impl std::fmt::Display for KneeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input shape ----
            KneeError::TooFewPoints { n, min } => {
                write!(f, "The input must have at least {min} points, got {n}")
            }
            KneeError::LengthMismatch { x_len, y_len } => {
                write!(f, "x and y must have the same length: {x_len} vs {y_len}")
            }
            KneeError::BadMatrixShape { rows, cols } => {
                write!(f, "Expected a 2×n or n×2 array, got {rows}×{cols}")
            }
            KneeError::NonFiniteValue { axis, index, value } => {
                write!(f, "Non-finite {axis} value {value} at index {index}")
            }

            // ---- Degenerate input ----
            KneeError::ConstantAxis { axis } => {
                write!(f, "All {axis} values are equal; cannot normalize")
            }
            KneeError::DuplicateX { index } => {
                write!(f, "Duplicate x value at sorted index {index}")
            }
            KneeError::XNotIncreasing { index } => {
                write!(f, "x must be strictly increasing when sorting is disabled (index {index})")
            }
            KneeError::InvalidSmoothing { value } => {
                write!(f, "Invalid smoothing factor {value}: must be finite and >= 0")
            }
            KneeError::InvalidSensitivity { value } => {
                write!(f, "Invalid Kneedle sensitivity {value}: must be finite and >= 0")
            }
            KneeError::InvalidTolerance { tol } => {
                write!(f, "Invalid C-method tolerance {tol}: must be finite and > 0")
            }
            KneeError::InvalidMaxIter { max_iter } => {
                write!(f, "Invalid maximum iterations {max_iter}: must be > 0")
            }

            // ---- Numerical ----
            KneeError::SingularSystem { stage } => {
                write!(f, "Singular linear system in {stage}")
            }
            KneeError::NonFiniteResult { stage, index } => {
                write!(f, "Non-finite value produced by {stage} at index {index}")
            }
            KneeError::NotConverged { iterations, last_step } => {
                write!(
                    f,
                    "C-method did not converge in {iterations} iterations (last step {last_step})"
                )
            }
            KneeError::Diverged { text } => {
                write!(f, "C-method diverged: {text}")
            }
            KneeError::RSquaredMismatch { pivot, from_ssr, from_pearson } => {
                write!(
                    f,
                    "R² mismatch at pivot {pivot}: {from_ssr} (SSR) vs {from_pearson} (Pearson)"
                )
            }
            KneeError::DegenerateScores { method } => {
                write!(f, "Method '{method}' produced no comparable scores")
            }
            KneeError::Backend { text } => {
                write!(f, "Optimizer backend error: {text}")
            }

            // ---- Method selection ----
            KneeError::UnknownMethod { name } => {
                write!(f, "Unknown method '{name}'")
            }

            // ---- Outcome ----
            KneeError::NoKneeFound { method, reason } => {
                write!(f, "Method '{method}' found no knee: {reason}")
            }
            KneeError::NoConsensus { attempted } => {
                write!(f, "None of the {attempted} methods found a knee")
            }
        }
    }
}

impl From<MethodError> for KneeError {
    fn from(err: MethodError) -> Self {
        match err {
            MethodError::TooFewPoints { n, min, .. } => KneeError::TooFewPoints { n, min },
            MethodError::LengthMismatch { x_len, y_len } => {
                KneeError::LengthMismatch { x_len, y_len }
            }
            MethodError::UnknownMethod { name, .. } => KneeError::UnknownMethod { name },
            MethodError::InvalidSensitivity { value, .. } => {
                KneeError::InvalidSensitivity { value }
            }
            MethodError::InvalidTolerance { tol, .. } => KneeError::InvalidTolerance { tol },
            MethodError::InvalidMaxIter { max_iter, .. } => KneeError::InvalidMaxIter { max_iter },
            MethodError::NoKneeFound { method, reason } => {
                KneeError::NoKneeFound { method, reason }
            }
            MethodError::DegenerateScores { method } => KneeError::DegenerateScores { method },
            MethodError::NotConverged { iterations, last_step } => {
                KneeError::NotConverged { iterations, last_step }
            }
            MethodError::RSquaredMismatch { pivot, from_ssr, from_pearson } => {
                KneeError::RSquaredMismatch { pivot, from_ssr, from_pearson }
            }
            MethodError::ConditionViolated { text } => KneeError::Diverged { text },
            other => KneeError::Backend { text: other.to_string() },
        }
    }
}

impl From<SmoothingError> for KneeError {
    fn from(err: SmoothingError) -> Self {
        match err {
            SmoothingError::TooFewPoints { n } => KneeError::TooFewPoints { n, min: 3 },
            SmoothingError::LengthMismatch { x_len, y_len } => {
                KneeError::LengthMismatch { x_len, y_len }
            }
            SmoothingError::NonIncreasingX { index } => KneeError::XNotIncreasing { index },
            SmoothingError::InvalidSmoothingFactor { value } => {
                KneeError::InvalidSmoothing { value }
            }
            SmoothingError::SingularWeightMatrix => {
                KneeError::SingularSystem { stage: "smoothing weight matrix" }
            }
            SmoothingError::SingularSystem => {
                KneeError::SingularSystem { stage: "smoothing spline system" }
            }
            SmoothingError::NonFiniteSolution { index } => {
                KneeError::NonFiniteResult { stage: "smoothing spline", index }
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<KneeError> for PyErr {
    fn from(err: KneeError) -> PyErr {
        PyValueError::new_err(format!("KneeError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Category-preserving conversions from the lower-layer error enums.
    // - Display text for a representative variant.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Method errors keep their category when lifted.
    //
    // Given
    // -----
    // - `TooFewPoints`, `ConditionViolated` and a wrapped backend error.
    //
    // Expect
    // ------
    // - `TooFewPoints` (method name dropped), `Diverged`, `Backend`.
    fn method_errors_keep_their_category() {
        let short = MethodError::TooFewPoints { method: "angle", n: 2, min: 3 };
        assert_eq!(KneeError::from(short), KneeError::TooFewPoints { n: 2, min: 3 });

        let flat = MethodError::ConditionViolated { text: "flat".to_string() };
        assert_eq!(KneeError::from(flat), KneeError::Diverged { text: "flat".to_string() });

        let backend = MethodError::BackendError { text: "observer".to_string() };
        assert!(matches!(KneeError::from(backend), KneeError::Backend { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Smoothing failures map onto the numerical and degenerate categories.
    //
    // Given
    // -----
    // - `SingularSystem` and `InvalidSmoothingFactor`.
    //
    // Expect
    // ------
    // - `SingularSystem { stage }` and `InvalidSmoothing { value }`.
    fn smoothing_errors_map_to_categories() {
        assert_eq!(
            KneeError::from(SmoothingError::SingularSystem),
            KneeError::SingularSystem { stage: "smoothing spline system" }
        );
        assert_eq!(
            KneeError::from(SmoothingError::InvalidSmoothingFactor { value: -2.0 }),
            KneeError::InvalidSmoothing { value: -2.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Messages carry the payload a user needs to fix the input.
    //
    // Given
    // -----
    // - `NonFiniteValue { axis: "y", index: 3, value: NaN }`.
    //
    // Expect
    // ------
    // - The axis and the index appear in the message.
    fn display_names_axis_and_index() {
        let msg = KneeError::NonFiniteValue { axis: "y", index: 3, value: f64::NAN }.to_string();
        assert!(msg.contains('y') && msg.contains('3'), "unexpected message: {msg}");
    }
}
