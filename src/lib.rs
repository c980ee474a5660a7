//! stable_logits — numerically stable logit-domain tools for classifier output layers.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and, behind the `python-bindings`
//! feature, as the PyO3 bridge exposing the eager transforms and metrics to
//! Python via the `_stable_logits` extension module.
//!
//! Key behaviors
//! -------------
//! - [`graph`]: immutable expression-graph nodes and introspection that
//!   recovers the logits fed into a softmax or sigmoid.
//! - [`losses`]: KL divergence and softmax ratios rebuilt from those logits so
//!   they stay well-conditioned near saturation.
//! - [`numerical_stability`]: eager softmax, sigmoid, and their inverses on
//!   `ndarray` values.
//! - [`metrics`]: precision, recall, and F1 with floored denominators.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every public operation is pure: inputs are never mutated and results are
//!   freshly allocated nodes or arrays, so calls are safe from any thread.
//! - Graph functions only record structure; nothing in this crate evaluates a
//!   graph.
//!
//! Conventions
//! -----------
//! - Fallible operations return [`errors::NnetResult`]; structural failures
//!   from introspection surface unchanged through the losses.
//! - Logging goes through `tracing` at `debug`/`trace` level; no subscriber is
//!   installed here.
//!
//! Downstream usage
//! ----------------
//! - Rust callers build nodes with [`graph::builders`] and pass softmax or
//!   sigmoid outputs to [`losses`]; realized batches go to
//!   [`numerical_stability`] and [`metrics`].
//! - Python callers import the `activations` and `metrics` submodules; graph
//!   functions are not bound because Python hosts carry their own graphs.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module.
//! - `tests/integration_output_layer.rs` evaluates recorded expressions with a
//!   test-only reference evaluator and compares them with naïve formulas.

pub mod errors;
pub mod graph;
pub mod losses;
pub mod metrics;
pub mod numerical_stability;
pub mod utils;

pub use errors::{NnetError, NnetResult};

pub mod prelude {
    pub use crate::errors::{NnetError, NnetResult};
    pub use crate::graph::prelude::*;
    pub use crate::losses::prelude::*;
    pub use crate::metrics::prelude::*;
    pub use crate::numerical_stability::prelude::*;
}

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2, PyArrayDyn, PyReadonlyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    metrics::MetricPolicy,
    numerical_stability::transformations,
    utils::{PyClassificationReport, extract_f64_array, extract_f64_vector},
};

/// Row-wise softmax of a 2-D float64 array.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "softmax", text_signature = "(x, /)")]
fn py_softmax<'py>(
    py: Python<'py>, x: PyReadonlyArray2<'py, f64>,
) -> Bound<'py, PyArray2<f64>> {
    transformations::softmax(&x.as_array()).into_pyarray(py)
}

/// Zero-mean logits reproducing a probability vector.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "pseudoinverse_softmax", text_signature = "(x, /)")]
fn py_pseudoinverse_softmax<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let arr = extract_f64_vector(py, x)?;
    Ok(transformations::pseudoinverse_softmax(&arr.as_array()).into_pyarray(py))
}

/// Elementwise logistic sigmoid of a realized array.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "sigmoid", text_signature = "(x, /)")]
fn py_sigmoid<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let arr = extract_f64_array(x)?;
    Ok(transformations::sigmoid(&arr.as_array()).into_pyarray(py))
}

/// Elementwise logit of values in (0, 1).
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "inverse_sigmoid", text_signature = "(x, /)")]
fn py_inverse_sigmoid<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let arr = extract_f64_array(x)?;
    Ok(transformations::inverse_sigmoid(&arr.as_array()).into_pyarray(py))
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "precision", signature = (tp, fp, floor = None))]
fn py_precision(tp: f64, fp: f64, floor: Option<f64>) -> PyResult<f64> {
    Ok(policy(floor)?.precision(tp, fp))
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "recall", signature = (y, tp, floor = None))]
fn py_recall<'py>(y: &Bound<'py, PyAny>, tp: f64, floor: Option<f64>) -> PyResult<f64> {
    let arr = extract_f64_array(y)?;
    Ok(policy(floor)?.recall(&arr.as_array(), tp))
}

#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "f1", signature = (precision, recall, floor = None))]
fn py_f1(precision: f64, recall: f64, floor: Option<f64>) -> PyResult<f64> {
    Ok(policy(floor)?.f1(precision, recall))
}

/// Threshold scores, count against targets, and report precision/recall/F1.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "classification_report",
    signature = (y, y_hat, threshold = 0.5, floor = None),
    text_signature = "(y, y_hat, /, threshold=0.5, floor=None)"
)]
fn py_classification_report<'py>(
    y: &Bound<'py, PyAny>, y_hat: &Bound<'py, PyAny>, threshold: f64, floor: Option<f64>,
) -> PyResult<PyClassificationReport> {
    let y = extract_f64_array(y)?;
    let y_hat = extract_f64_array(y_hat)?;
    let inner = policy(floor)?.report(&y.as_array(), &y_hat.as_array(), threshold)?;
    Ok(PyClassificationReport { inner })
}

#[cfg(feature = "python-bindings")]
fn policy(floor: Option<f64>) -> PyResult<MetricPolicy> {
    match floor {
        Some(value) => Ok(MetricPolicy::new(value)?),
        None => Ok(MetricPolicy::default()),
    }
}

/// _stable_logits — PyO3 module initializer for the Python extension.
///
/// Creates the `activations` and `metrics` submodules, attaches them to the
/// parent module, and registers them in `sys.modules` so dotted imports
/// (`stable_logits.metrics`) work.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _stable_logits<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let activations_mod = PyModule::new(py, "activations")?;
    let metrics_mod = PyModule::new(py, "metrics")?;
    register_activations(m, &activations_mod)?;
    register_metrics(m, &metrics_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    let modules = py.import("sys")?.getattr("modules")?;
    modules.set_item("stable_logits.activations", activations_mod)?;
    modules.set_item("stable_logits.metrics", metrics_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn register_activations<'py>(
    parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_softmax, m)?)?;
    m.add_function(wrap_pyfunction!(py_pseudoinverse_softmax, m)?)?;
    m.add_function(wrap_pyfunction!(py_sigmoid, m)?)?;
    m.add_function(wrap_pyfunction!(py_inverse_sigmoid, m)?)?;
    parent.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn register_metrics<'py>(
    parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_precision, m)?)?;
    m.add_function(wrap_pyfunction!(py_recall, m)?)?;
    m.add_function(wrap_pyfunction!(py_f1, m)?)?;
    m.add_function(wrap_pyfunction!(py_classification_report, m)?)?;
    m.add_class::<PyClassificationReport>()?;
    parent.add_submodule(m)?;
    Ok(())
}
