//! Numerical stability utilities for realized arrays.
//!
//! Provides eager implementations of the output-layer nonlinearities and
//! their inverses, plus scalar helpers that stay finite where the naïve
//! formulas overflow. Everything here operates on `ndarray` values; nothing
//! accepts or builds graph nodes, so these functions can never slip an
//! untracked nonlinearity into a differentiable graph.
//!
//! # Provided items
//! - [`SOFTPLUS_CUTOFF`]: threshold above which `softplus(x) ≈ x` in `f64`.
//! - [`safe_softplus(x)`]: stable `ln(1 + exp(x))`.
//! - [`safe_logistic(x)`]: sigmoid that never evaluates `exp` of a large
//!   positive number.
//! - [`softmax`]: row-wise softmax with max-subtraction.
//! - [`pseudoinverse_softmax`]: zero-mean logits reproducing a distribution.
//! - [`sigmoid`] / [`inverse_sigmoid`]: elementwise logistic map and logit.

use ndarray::{Array, Array1, Array2, ArrayBase, Data, Dimension, Ix1, Ix2};

/// Cutoff for [`safe_softplus`].
///
/// For `x > 20`, `exp(-x) < 2.1e-9` and `x + ln1p(exp(-x))` rounds to within
/// a few ulps of `x`.
pub const SOFTPLUS_CUTOFF: f64 = 20.0;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For `x > SOFTPLUS_CUTOFF`, returns `x`.
/// - Otherwise evaluates `ln1p(exp(x))`, which keeps full precision for large
///   negative `x` where `exp(x)` underflows gracefully toward 0.
pub fn safe_softplus(x: f64) -> f64 {
    if x > SOFTPLUS_CUTOFF { x } else { x.exp().ln_1p() }
}

/// Numerically stable logistic sigmoid `1 / (1 + exp(-x))`.
///
/// Branches on the sign of `x` so the exponential is always of a
/// non-positive number: for `x < 0` it evaluates `e^x / (1 + e^x)`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Row-wise softmax of a matrix.
///
/// Parameters
/// ----------
/// - `x`: `&ArrayBase<S, Ix2>`
///   Matrix of logits; row `i` is one example.
///
/// Returns
/// -------
/// `Array2<f64>`
///   `out[i, :] = softmax(x[i, :])`. Each row is shifted by its maximum
///   before exponentiating, so the largest exponent is `exp(0) = 1` and no
///   row can overflow; every row sums to 1 within rounding.
///
/// Notes
/// -----
/// - Entries are strictly positive unless a row spans more than ~745 in
///   range, where the smallest terms underflow to 0.
/// - A row containing `+∞` or only `-∞` produces NaN.
pub fn softmax<S>(x: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let mut out = x.to_owned();
    for mut row in out.rows_mut() {
        let row_max = row.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        row.mapv_inplace(|v| (v - row_max).exp());
        let total = row.sum();
        row.mapv_inplace(|v| v / total);
    }
    out
}

/// Pseudo-inverse of the softmax map for a single distribution.
///
/// Softmax is shift invariant, so `softmax(y) = x` has a one-parameter
/// family of solutions. The zero-mean representative is returned:
/// `y = ln(x) - mean(ln(x))`.
///
/// Any `x_i == 0` gives `ln(0) = -∞`, and the result is undefined (contains
/// non-finite values). An empty vector maps to an empty vector.
pub fn pseudoinverse_softmax<S>(x: &ArrayBase<S, Ix1>) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    let mut y = x.mapv(f64::ln);
    if let Some(mean) = y.mean() {
        y -= mean;
    }
    y
}

/// Elementwise logistic sigmoid `1 / (1 + exp(-x))` of a realized array.
///
/// Accepts only realized arrays. Graph-side sigmoids are built with
/// [`crate::graph::builders::sigmoid`] instead.
pub fn sigmoid<S, D>(x: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    x.mapv(|v| 1.0 / (1.0 + (-v).exp()))
}

/// Elementwise logit `ln(x / (1 - x))`, the inverse of [`sigmoid`] on `(0, 1)`.
///
/// Diverges to `-∞` at 0 and `+∞` at 1; values outside `[0, 1]` give NaN.
pub fn inverse_sigmoid<S, D>(x: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    x.mapv(|p| (p / (1.0 - p)).ln())
}
