//! methods::errors — error surface for the knee-detection algorithms.
//!
//! Purpose
//! -------
//! Collect every failure a detection method (or its options) can report:
//! too-short series, missing knees, invalid tuning parameters, numerical
//! trouble in the C-method solve or the OLS cross-check, and wrapped
//! `argmin` backend errors. The pipeline lifts these into `KneeError`.
//!
//! Conventions
//! -----------
//! - `method` payloads hold the snake_case registry name of the failing
//!   method so messages read the same as the names callers pass in.
//! - `argmin::core::Error` converts through `From`, downcasting to the
//!   concrete `ArgminError` variant when possible.
use argmin::core::{ArgminError, Error};

/// Result alias for detection methods and their options.
pub type MethodResult<T> = Result<T, MethodError>;

#[derive(Debug, Clone, PartialEq)]
pub enum MethodError {
    // ---- Inputs ----
    /// The series is shorter than the method requires.
    TooFewPoints { method: &'static str, n: usize, min: usize },

    /// Abscissae and ordinates differ in length.
    LengthMismatch { x_len: usize, y_len: usize },

    /// Method name did not parse.
    UnknownMethod { name: String, reason: &'static str },

    // ---- Options ----
    /// Kneedle sensitivity must be finite and >= 0.
    InvalidSensitivity { value: f64, reason: &'static str },

    /// C-method step tolerance must be finite and > 0.
    InvalidTolerance { tol: f64, reason: &'static str },

    /// C-method iteration cap must be > 0.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    // ---- Outcome ----
    /// The method ran but no candidate survived its selection rule.
    NoKneeFound { method: &'static str, reason: &'static str },

    /// Every score was NaN, so no extremum exists.
    DegenerateScores { method: &'static str },

    /// C-method hit its iteration cap before the step fell below tolerance.
    NotConverged { iterations: u64, last_step: f64 },

    /// The SSR-based and correlation-based R² disagree.
    RSquaredMismatch { pivot: usize, from_ssr: f64, from_pearson: f64 },

    // ---- Argmin ----
    /// The Newton solve started without a shape parameter.
    NotInitialized { text: String },
    /// Vanishing second derivative or non-finite iterate.
    ConditionViolated { text: String },
    /// Any other argmin failure, kept as its message.
    BackendError { text: String },
}

impl std::error::Error for MethodError {}

impl std::fmt::Display for MethodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Inputs ----
            MethodError::TooFewPoints { method, n, min } => {
                write!(f, "Method '{method}' needs at least {min} points, got {n}")
            }
            MethodError::LengthMismatch { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            MethodError::UnknownMethod { name, reason } => {
                write!(f, "Unknown method '{name}': {reason}")
            }

            // ---- Options ----
            MethodError::InvalidSensitivity { value, reason } => {
                write!(f, "Invalid Kneedle sensitivity {value}: {reason}")
            }
            MethodError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid C-method tolerance {tol}: {reason}")
            }
            MethodError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }

            // ---- Outcome ----
            MethodError::NoKneeFound { method, reason } => {
                write!(f, "Method '{method}' found no knee: {reason}")
            }
            MethodError::DegenerateScores { method } => {
                write!(f, "Method '{method}' produced no comparable scores")
            }
            MethodError::NotConverged { iterations, last_step } => {
                write!(
                    f,
                    "C-method did not converge in {iterations} iterations (last step {last_step})"
                )
            }
            MethodError::RSquaredMismatch { pivot, from_ssr, from_pearson } => {
                write!(
                    f,
                    "R² mismatch at pivot {pivot}: {from_ssr} (SSR) vs {from_pearson} (Pearson)"
                )
            }

            // ---- Argmin ----
            MethodError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            MethodError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            MethodError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }
        }
    }
}

impl From<Error> for MethodError {
    fn from(err: Error) -> Self {
        match err.downcast::<ArgminError>() {
            Ok(ArgminError::NotInitialized { text }) => MethodError::NotInitialized { text },
            Ok(ArgminError::ConditionViolated { text }) => MethodError::ConditionViolated { text },
            Ok(other) => MethodError::BackendError { text: other.to_string() },
            Err(err) => MethodError::BackendError { text: err.to_string() },
        }
    }
}
