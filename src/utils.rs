//! Python-side input conversion for the PyO3 bindings.
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
use crate::pipeline::input::PointInput;

/// Borrow a 1-D float64 array from a numpy array, a pandas Series, or any
/// sequence of floats (copied).
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(series_ro);
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 2-D float64 array from a numpy array or a nested sequence.
///
/// Returns `Ok(None)` when `raw_data` is not two-dimensional, so the caller
/// can fall back to the 1-D path.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix(raw_data: &Bound<'_, PyAny>) -> PyResult<Option<Array2<f64>>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(Some(arr_ro.as_array().to_owned()));
    }

    let Ok(rows) = raw_data.extract::<Vec<Vec<f64>>>() else {
        return Ok(None);
    };
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != n_cols) {
        return Err(PyValueError::new_err("nested sequences must all have the same length"));
    }
    let n_rows = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map(Some)
        .map_err(|e| PyValueError::new_err(format!("invalid 2-D input: {e}")))
}

/// Resolve the `(data, y)` call convention of the Python entry points.
///
/// - `y` given: `data` is x and both must be 1-D.
/// - `y` omitted: `data` is either a 2-D point array or a 1-D y series.
#[cfg(feature = "python-bindings")]
pub fn extract_point_input<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>,
) -> PyResult<PointInput> {
    if let Some(y) = y {
        let x = owned_vector(py, data)?;
        let y = owned_vector(py, y)?;
        return Ok(PointInput::Paired { x, y });
    }
    if let Some(matrix) = extract_f64_matrix(data)? {
        return Ok(PointInput::Matrix(matrix));
    }
    Ok(PointInput::Values(owned_vector(py, data)?))
}

#[cfg(feature = "python-bindings")]
fn owned_vector<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    Ok(extract_f64_array(py, raw_data)?.as_array().to_owned())
}
