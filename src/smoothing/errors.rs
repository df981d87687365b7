//! smoothing::errors — error surface for the cubic smoothing spline.
//!
//! Purpose
//! -------
//! Describe every way the smoothing-spline solve can fail: malformed inputs
//! (too few points, mismatched lengths, non-increasing abscissae, a bad
//! smoothing factor) and singular linear systems. The pipeline converts
//! these into `KneeError` via `From`.
//!
//! Conventions
//! -----------
//! - Variants carry just the offending value or index.
//! - Messages name the violated constraint rather than the failing line of
//!   linear algebra.

/// Result alias for smoothing routines.
pub type SmoothingResult<T> = Result<T, SmoothingError>;

/// SmoothingError — failures of the cubic smoothing spline.
///
/// Variants
/// --------
/// - `TooFewPoints { n }`
///   At least 3 points are needed for a single second difference.
/// - `LengthMismatch { x_len, y_len }`
///   Abscissae and ordinates differ in length.
/// - `NonIncreasingX { index }`
///   `x[index] <= x[index - 1]`; the gap `h` would be zero or negative.
/// - `InvalidSmoothingFactor { value }`
///   The smoothing factor is negative or non-finite.
/// - `SingularWeightMatrix`
///   The tridiagonal weight matrix `W` is not positive definite.
/// - `SingularSystem`
///   The final `(I + λ·ΔᵗW⁻¹Δ)` system could not be solved.
/// - `NonFiniteSolution { index }`
///   The solve produced a non-finite ordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum SmoothingError {
    // ---- Inputs ----
    TooFewPoints { n: usize },
    LengthMismatch { x_len: usize, y_len: usize },
    NonIncreasingX { index: usize },
    InvalidSmoothingFactor { value: f64 },

    // ---- Linear algebra ----
    SingularWeightMatrix,
    SingularSystem,
    NonFiniteSolution { index: usize },
}

impl std::error::Error for SmoothingError {}

impl std::fmt::Display for SmoothingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Inputs ----
            SmoothingError::TooFewPoints { n } => {
                write!(f, "Smoothing spline needs at least 3 points, got {n}")
            }
            SmoothingError::LengthMismatch { x_len, y_len } => {
                write!(f, "Smoothing spline length mismatch: x has {x_len}, y has {y_len}")
            }
            SmoothingError::NonIncreasingX { index } => {
                write!(f, "Smoothing spline requires strictly increasing x (violated at {index})")
            }
            SmoothingError::InvalidSmoothingFactor { value } => {
                write!(f, "Invalid smoothing factor {value}: must be finite and >= 0")
            }

            // ---- Linear algebra ----
            SmoothingError::SingularWeightMatrix => {
                write!(f, "Smoothing spline weight matrix is not positive definite")
            }
            SmoothingError::SingularSystem => {
                write!(f, "Smoothing spline system is singular")
            }
            SmoothingError::NonFiniteSolution { index } => {
                write!(f, "Smoothing spline produced a non-finite value at index {index}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Display messages embed their payloads.
    //
    // Given
    // -----
    // - A `NonIncreasingX` and an `InvalidSmoothingFactor` error.
    //
    // Expect
    // ------
    // - The index and the value appear in the rendered messages.
    fn display_embeds_payload() {
        let msg = SmoothingError::NonIncreasingX { index: 7 }.to_string();
        assert!(msg.contains('7'), "unexpected message: {msg}");
        let msg = SmoothingError::InvalidSmoothingFactor { value: -0.5 }.to_string();
        assert!(msg.contains("-0.5"), "unexpected message: {msg}");
    }
}
