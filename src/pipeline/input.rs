//! pipeline::input — accepted input shapes and their parsing.
//!
//! Purpose
//! -------
//! Turn whatever the caller hands in (paired vectors, a bare y series, or a
//! single 2-D array) into one validated `(x, y)` column pair.
//!
//! Key behaviors
//! -------------
//! - `Values(y)` implies `x = 0, 1, …, n−1`.
//! - `Matrix(a)` is squeezed when one dimension is 1 (then treated as
//!   `Values`). Otherwise an array with more rows than columns is
//!   transposed, and the result must have exactly two rows: `x` then `y`.
//! - Every shape must yield at least [`MIN_POINTS`] samples, equal lengths
//!   and finite coordinates.
//!
//! Conventions
//! -----------
//! - `From` conversions exist for the common Rust containers so entry points
//!   can take `impl Into<PointInput>`.
use crate::pipeline::errors::{KneeError, KneeResult};
use ndarray::{Array1, Array2, ArrayView1};

/// Smallest series the pipeline accepts.
pub const MIN_POINTS: usize = 4;

/// Caller-supplied point set, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum PointInput {
    /// Separate abscissae and ordinates.
    Paired { x: Array1<f64>, y: Array1<f64> },
    /// Ordinates only; abscissae are the sample positions.
    Values(Array1<f64>),
    /// A 2×n or n×2 array (1×n and n×1 are squeezed to `Values`).
    Matrix(Array2<f64>),
}

impl PointInput {
    /// Resolve the input into validated `(x, y)` columns.
    ///
    /// # Errors
    /// - `KneeError::BadMatrixShape` when a 2-D input is not 2×n / n×2.
    /// - `KneeError::LengthMismatch` when paired inputs differ in length.
    /// - `KneeError::TooFewPoints` for fewer than [`MIN_POINTS`] samples.
    /// - `KneeError::NonFiniteValue` for NaN or infinite coordinates.
    pub fn into_columns(self) -> KneeResult<(Array1<f64>, Array1<f64>)> {
        let (x, y) = match self {
            PointInput::Paired { x, y } => (x, y),
            PointInput::Values(y) => (positions(y.len()), y),
            PointInput::Matrix(matrix) => split_matrix(matrix)?,
        };
        if x.len() != y.len() {
            return Err(KneeError::LengthMismatch { x_len: x.len(), y_len: y.len() });
        }
        if x.len() < MIN_POINTS {
            return Err(KneeError::TooFewPoints { n: x.len(), min: MIN_POINTS });
        }
        require_finite("x", x.view())?;
        require_finite("y", y.view())?;
        Ok((x, y))
    }
}

fn positions(n: usize) -> Array1<f64> {
    Array1::from_iter((0..n).map(|i| i as f64))
}

fn split_matrix(matrix: Array2<f64>) -> KneeResult<(Array1<f64>, Array1<f64>)> {
    let (rows, cols) = matrix.dim();
    if rows == 1 || cols == 1 {
        let y = Array1::from_iter(matrix.iter().copied());
        return Ok((positions(y.len()), y));
    }
    let oriented = if rows > cols { matrix.reversed_axes() } else { matrix };
    if oriented.nrows() != 2 {
        return Err(KneeError::BadMatrixShape { rows, cols });
    }
    Ok((oriented.row(0).to_owned(), oriented.row(1).to_owned()))
}

fn require_finite(axis: &'static str, values: ArrayView1<f64>) -> KneeResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(KneeError::NonFiniteValue { axis, index, value: values[index] }),
        None => Ok(()),
    }
}

// ---- Conversions ----

impl From<Array1<f64>> for PointInput {
    fn from(y: Array1<f64>) -> Self {
        PointInput::Values(y)
    }
}

impl From<Vec<f64>> for PointInput {
    fn from(y: Vec<f64>) -> Self {
        PointInput::Values(Array1::from(y))
    }
}

impl From<&[f64]> for PointInput {
    fn from(y: &[f64]) -> Self {
        PointInput::Values(Array1::from(y.to_vec()))
    }
}

impl From<ArrayView1<'_, f64>> for PointInput {
    fn from(y: ArrayView1<'_, f64>) -> Self {
        PointInput::Values(y.to_owned())
    }
}

impl From<(Array1<f64>, Array1<f64>)> for PointInput {
    fn from((x, y): (Array1<f64>, Array1<f64>)) -> Self {
        PointInput::Paired { x, y }
    }
}

impl From<(Vec<f64>, Vec<f64>)> for PointInput {
    fn from((x, y): (Vec<f64>, Vec<f64>)) -> Self {
        PointInput::Paired { x: Array1::from(x), y: Array1::from(y) }
    }
}

impl From<(&[f64], &[f64])> for PointInput {
    fn from((x, y): (&[f64], &[f64])) -> Self {
        PointInput::Paired { x: Array1::from(x.to_vec()), y: Array1::from(y.to_vec()) }
    }
}

impl From<Array2<f64>> for PointInput {
    fn from(matrix: Array2<f64>) -> Self {
        PointInput::Matrix(matrix)
    }
}
