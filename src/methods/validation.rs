//! Shared input checks and score reduction for the detection methods.
use crate::{
    geometry::argmax,
    methods::errors::{MethodError, MethodResult},
};
use ndarray::ArrayView1;

/// Ensure `x` and `y` have equal length of at least `min` points.
///
/// Returns the common length on success.
pub(crate) fn check_series(
    method: &'static str, x: ArrayView1<f64>, y: ArrayView1<f64>, min: usize,
) -> MethodResult<usize> {
    if x.len() != y.len() {
        return Err(MethodError::LengthMismatch { x_len: x.len(), y_len: y.len() });
    }
    let n = x.len();
    if n < min {
        return Err(MethodError::TooFewPoints { method, n, min });
    }
    Ok(n)
}

/// First maximum of `scores`, or `DegenerateScores` when every entry is NaN.
pub(crate) fn best_score(method: &'static str, scores: ArrayView1<f64>) -> MethodResult<usize> {
    argmax(scores).ok_or(MethodError::DegenerateScores { method })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Each branch of the shared checks reports its own error.
    //
    // Given
    // -----
    // - Mismatched lengths, a short series, an all-NaN score vector.
    //
    // Expect
    // ------
    // - LengthMismatch, TooFewPoints and DegenerateScores respectively.
    fn shared_checks_report_specific_errors() {
        let x = array![0.0, 1.0, 2.0];
        assert_eq!(
            check_series("angle", x.view(), array![0.0, 1.0].view(), 3),
            Err(MethodError::LengthMismatch { x_len: 3, y_len: 2 })
        );
        assert_eq!(
            check_series("angle", x.view(), x.view(), 4),
            Err(MethodError::TooFewPoints { method: "angle", n: 3, min: 4 })
        );
        assert_eq!(check_series("angle", x.view(), x.view(), 3), Ok(3));
        assert_eq!(
            best_score("angle", array![f64::NAN].view()),
            Err(MethodError::DegenerateScores { method: "angle" })
        );
    }
}
