//! Kneedle: local maxima of the difference curve with a decay threshold.
//!
//! On the canonical curve the difference `d = y − x` measures how far each
//! sample sits above the diagonal. Every strict local maximum `mⱼ` of `d` is
//! a knee candidate with threshold `tⱼ = d[mⱼ] − S/(n−1)`. A candidate is
//! confirmed when the difference curve drops below its threshold before the
//! next candidate is reached. A lone maximum is returned as is; otherwise
//! the first confirmed maximum is returned shifted by one sample.
use crate::methods::{
    errors::{MethodError, MethodResult},
    options::KneedleOptions,
    validation::check_series,
};
use ndarray::{Array1, ArrayView1};

/// Kneedle knee of a canonical series.
///
/// # Parameters
/// - `x`, `y`: canonical series (normalized, increasing concave).
/// - `opts.sensitivity`: threshold decay `S`, in units of `1/(n−1)`.
///
/// # Errors
/// - `MethodError::TooFewPoints` for fewer than 3 samples.
/// - `MethodError::NoKneeFound` when `d` has no strict local maximum or no
///   maximum is confirmed by its threshold.
pub fn kneedle(
    x: ArrayView1<f64>, y: ArrayView1<f64>, opts: &KneedleOptions,
) -> MethodResult<usize> {
    let n = check_series("kneedle", x, y, 3)?;
    let diff: Array1<f64> = &y - &x;
    let maxima = strict_local_maxima(diff.view());

    match maxima.as_slice() {
        [] => Err(MethodError::NoKneeFound {
            method: "kneedle",
            reason: "difference curve has no local maximum",
        }),
        [single] => Ok(*single),
        _ => {
            let decay = opts.sensitivity / (n - 1) as f64;
            maxima
                .iter()
                .enumerate()
                .find(|&(j, &m)| {
                    let threshold = diff[m] - decay;
                    let next = maxima.get(j + 1).copied().unwrap_or(n);
                    let drop = (m + 1..n).find(|&k| diff[k] < threshold);
                    matches!(drop, Some(k) if m < k && k < next)
                })
                .map(|(_, &m)| m + 1)
                .ok_or(MethodError::NoKneeFound {
                    method: "kneedle",
                    reason: "no local maximum crossed its threshold",
                })
        }
    }
}

/// Interior indices `i` with `d[i−1] < d[i] > d[i+1]`, ascending.
fn strict_local_maxima(diff: ArrayView1<f64>) -> Vec<usize> {
    (1..diff.len().saturating_sub(1))
        .filter(|&i| diff[i] > diff[i - 1] && diff[i] > diff[i + 1])
        .collect()
}
