//! rust_knee — knee (elbow) detection for monotonic 2-D curves, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the knee-detection pipeline to Python via the `_rust_knee` extension module.
//! When the `python-bindings` feature is enabled, this module defines the
//! Python-facing functions and result class used by the `rust_knee` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`geometry`, `smoothing`, `methods`,
//!   `pipeline`) as the public crate surface.
//! - Define `find_knee`, `find_knee_consensus` and the `METHODS` constant for
//!   the `_rust_knee` Python extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, input conversion and error mapping.
//! - Indices returned to Python refer to the input sorted by x, matching
//!   [`pipeline::find_knee`].
//!
//! Conventions
//! -----------
//! - Method names are the snake_case names of [`methods::KneeMethod`].
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should call [`find_knee`] or build a
//!   [`pipeline::KneePipeline`]; the PyO3 items are feature-gated.
//! - The Python package imports `_rust_knee` and re-exports its functions.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   end-to-end tests under `tests/`.
//!
//! Example
//! -------
//! ```rust
//! let knee = rust_knee::find_knee(vec![1.0, 2.0, 3.0, 4.0, 6.0], "angle", 0.0, true).unwrap();
//! assert_eq!(knee, 3);
//! ```

pub mod geometry;
pub mod methods;
pub mod pipeline;
pub mod smoothing;
pub mod utils;

pub use crate::methods::KneeMethod;
pub use crate::pipeline::{
    ConsensusOutcome, KneeError, KneeOptions, KneePipeline, KneeReport, KneeResult, KneeType,
    PointInput, find_knee, find_knee_consensus,
};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::utils::extract_point_input;

#[cfg(feature = "python-bindings")]
fn python_options(smoothing: f64, sort: bool, sensitivity: Option<f64>) -> PyResult<KneeOptions> {
    let options = KneeOptions::with_smoothing(smoothing, sort)?;
    Ok(match sensitivity {
        Some(value) => options.sensitivity(value)?,
        None => options,
    })
}

/// Locate the knee of a point series.
///
/// Parameters
/// ----------
/// - `data`: x values when `y` is given; otherwise a 1-D y series (x is
///   `0..n`) or a 2×n / n×2 point array.
/// - `y`: optional ordinates.
/// - `method`: one of `METHODS`; defaults to `"menger_successive"`.
/// - `smoothing`: smoothing-spline factor, `0` disables smoothing.
/// - `sort`: sort the points by x first.
/// - `sensitivity`: Kneedle sensitivity, defaults to 1.0.
///
/// Returns the knee index in x-sorted order.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "find_knee",
    signature = (
        data,
        y = None,
        method = "menger_successive",
        smoothing = 0.0,
        sort = true,
        sensitivity = None,
    ),
    text_signature = "(data, y=None, /, method='menger_successive', smoothing=0.0, sort=True, \
                      sensitivity=None)"
)]
#[allow(clippy::too_many_arguments)]
pub fn py_find_knee<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>, method: &str,
    smoothing: f64, sort: bool, sensitivity: Option<f64>,
) -> PyResult<usize> {
    let input = extract_point_input(py, data, y)?;
    let options = python_options(smoothing, sort, sensitivity)?;
    let report = KneePipeline::from_name(method, options)?.run(input)?;
    Ok(report.index)
}

/// KneeConsensus — Python-facing result of a majority vote across methods.
///
/// Fields
/// ------
/// - `inner`: [`ConsensusOutcome`]
///   Rust-side outcome read by the property getters.
///
/// Notes
/// -----
/// - Native Rust code should call [`find_knee_consensus`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_knee", frozen)]
pub struct KneeConsensus {
    inner: ConsensusOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl KneeConsensus {
    /// Winning index in x-sorted order.
    #[getter]
    pub fn index(&self) -> usize {
        self.inner.index
    }

    /// Winning index in the caller's input order.
    #[getter]
    pub fn source_index(&self) -> usize {
        self.inner.source_index
    }

    #[getter]
    pub fn votes(&self) -> usize {
        self.inner.votes
    }

    /// Orientation class of the normalized curve.
    #[getter]
    pub fn knee_type(&self) -> &'static str {
        self.inner.knee_type.name()
    }

    /// `(method, index or None)` for every method, in `METHODS` order.
    #[getter]
    pub fn ballots(&self) -> Vec<(&'static str, Option<usize>)> {
        self.inner
            .ballots
            .iter()
            .map(|(method, outcome)| (method.name(), outcome.as_ref().ok().copied()))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "KneeConsensus(index={}, votes={}, knee_type='{}')",
            self.inner.index,
            self.inner.votes,
            self.inner.knee_type.name()
        )
    }
}

/// Run every method and return the majority knee as a `KneeConsensus`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "find_knee_consensus",
    signature = (data, y = None, smoothing = 0.0, sort = true, sensitivity = None),
    text_signature = "(data, y=None, /, smoothing=0.0, sort=True, sensitivity=None)"
)]
pub fn py_find_knee_consensus<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>, smoothing: f64,
    sort: bool, sensitivity: Option<f64>,
) -> PyResult<KneeConsensus> {
    let input = extract_point_input(py, data, y)?;
    let options = python_options(smoothing, sort, sensitivity)?;
    let inner = find_knee_consensus(input, &options)?;
    Ok(KneeConsensus { inner })
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_knee<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_find_knee, m)?)?;
    m.add_function(wrap_pyfunction!(py_find_knee_consensus, m)?)?;
    m.add_class::<KneeConsensus>()?;
    let names: Vec<&'static str> = KneeMethod::ALL.iter().map(KneeMethod::name).collect();
    m.add("METHODS", names)?;
    Ok(())
}
