//! Angle-change knee detection.
//!
//! Each segment between consecutive samples has a direction angle
//! `atan2(Δy, Δx)`. The knee is the sample where the direction turns the
//! most, i.e. `argmax |θᵢ₊₁ − θᵢ| + 1`.
use crate::methods::{
    errors::MethodResult,
    validation::{best_score, check_series},
};
use ndarray::{Array1, ArrayView1, Zip, s};

/// Knee at the sharpest change of segment direction.
///
/// # Errors
/// - `MethodError::TooFewPoints` for fewer than 3 samples.
/// - `MethodError::LengthMismatch` when `x` and `y` differ in length.
pub fn angle(x: ArrayView1<f64>, y: ArrayView1<f64>) -> MethodResult<usize> {
    check_series("angle", x, y, 3)?;
    let dx = &x.slice(s![1..]) - &x.slice(s![..-1]);
    let dy = &y.slice(s![1..]) - &y.slice(s![..-1]);
    let angles: Array1<f64> = Zip::from(&dy).and(&dx).map_collect(|&dy, &dx| dy.atan2(dx));
    let turns = (&angles.slice(s![1..]) - &angles.slice(s![..-1])).mapv(f64::abs);
    Ok(best_score("angle", turns.view())? + 1)
}
