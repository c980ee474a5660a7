//! utils — conversion helpers for the Python bindings.
//!
//! Only compiled with the `python-bindings` feature. Python callers pass
//! numpy arrays, pandas objects, or plain sequences; these helpers normalize
//! them into read-only numpy views that the Rust transforms can borrow.

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray1, PyReadonlyArrayDyn};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::metrics::ClassificationReport;

/// Borrow a 1-D float64 array from a numpy array, a pandas Series, or a
/// sequence of floats (copied once in the last case).
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vector<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr);
    }

    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(series) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(series);
        }
    }

    let vec: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Borrow a float64 array of any rank from a numpy array or a pandas object.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_array<'py>(raw: &Bound<'py, PyAny>) -> PyResult<PyReadonlyArrayDyn<'py, f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArrayDyn<f64>>() {
        return Ok(arr);
    }

    let obj = raw.call_method("to_numpy", (false,), None).map_err(|_| {
        PyTypeError::new_err("expected a float64 numpy.ndarray or pandas object")
    })?;
    obj.extract::<PyReadonlyArrayDyn<f64>>()
        .map_err(|_| PyTypeError::new_err("expected a float64 numpy.ndarray or pandas object"))
}

/// Python-facing view of a [`ClassificationReport`].
#[cfg(feature = "python-bindings")]
#[pyclass(module = "stable_logits.metrics", name = "ClassificationReport", frozen)]
pub struct PyClassificationReport {
    pub inner: ClassificationReport,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyClassificationReport {
    #[getter]
    pub fn precision(&self) -> f64 {
        self.inner.precision
    }

    #[getter]
    pub fn recall(&self) -> f64 {
        self.inner.recall
    }

    #[getter]
    pub fn f1(&self) -> f64 {
        self.inner.f1
    }

    fn __repr__(&self) -> String {
        format!(
            "ClassificationReport(precision={:.6}, recall={:.6}, f1={:.6})",
            self.inner.precision, self.inner.recall, self.inner.f1
        )
    }
}
