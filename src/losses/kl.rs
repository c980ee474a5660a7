//! losses::kl — Bernoulli KL divergence expressed in the logit domain.
//!
//! Purpose
//! -------
//! Build the KL divergence between targets `Y` and sigmoid predictions
//! `Ŷ = σ(Z)` without ever forming `ln σ(Z)` or `ln(1 - σ(Z))`.
//!
//! Key behaviors
//! -------------
//! - Recover `Z` from `Ŷ` with [`find_sigmoid_argument`].
//! - Use the identities `-ln σ(Z) = softplus(-Z)` and
//!   `-ln(1 - σ(Z)) = softplus(Z)` to record
//!   `Y·softplus(-Z) + (1 - Y)·softplus(Z)`.
//! - [`kl`] averages over every axis except the batch axis; [`elemwise_kl`]
//!   keeps the elementwise expression.
//!
//! Invariants & assumptions
//! ------------------------
//! - The `p ln p + (1 - p) ln(1 - p)` entropy terms are dropped. They vanish
//!   for binary targets and do not depend on `Z`, so gradients are exact for
//!   any target in `[0, 1]`; only the reported value differs for soft targets.
//! - Introspection errors propagate unchanged, and all checks run before any
//!   node is recorded.

use tracing::trace;

use crate::{
    errors::{NnetError, NnetResult},
    graph::{
        GraphNode,
        builders::{mean, softplus},
        find_sigmoid_argument,
    },
    losses::{options::LossOptions, validation::check_target_domain},
};

/// Mean KL divergence per example, with validation off.
///
/// See [`kl_with_options`].
pub fn kl(y: &GraphNode, y_hat: &GraphNode, batch_axis: usize) -> NnetResult<GraphNode> {
    kl_with_options(y, y_hat, batch_axis, &LossOptions::default())
}

/// Mean KL divergence per example between targets `y` and sigmoid outputs
/// `y_hat`.
///
/// Parameters
/// ----------
/// - `y`: `&GraphNode`
///   Targets with values in `[0, 1]`.
/// - `y_hat`: `&GraphNode`
///   Output of a graph sigmoid, optionally wrapped once in a print.
/// - `batch_axis`: `usize`
///   The one axis kept in the result; every other axis is averaged.
/// - `opts`: `&LossOptions`
///   Validation mode for the target-domain check.
///
/// Returns
/// -------
/// `NnetResult<GraphNode>`
///   Node of rank 1 holding the mean divergence of each example. When the
///   elementwise expression already has rank 1 it is returned unreduced.
///
/// Errors
/// ------
/// - Any error of [`find_sigmoid_argument`], unchanged.
/// - `NnetError::Domain` under `ValidationMode::Checked`.
/// - `NnetError::InvalidBatchAxis` when `batch_axis` does not index the
///   elementwise expression.
pub fn kl_with_options(
    y: &GraphNode, y_hat: &GraphNode, batch_axis: usize, opts: &LossOptions,
) -> NnetResult<GraphNode> {
    let total = elemwise_kl_with_options(y, y_hat, opts)?;
    let ndim = total.ndim();
    if batch_axis >= ndim {
        return Err(NnetError::InvalidBatchAxis { axis: batch_axis, ndim });
    }

    let axes_to_reduce: Vec<usize> = (0..ndim).filter(|&axis| axis != batch_axis).collect();
    trace!(batch_axis, ?axes_to_reduce, "averaging kl over non-batch axes");
    Ok(mean(&total, &axes_to_reduce, false))
}

/// Elementwise KL divergence, with validation off.
///
/// See [`elemwise_kl_with_options`].
pub fn elemwise_kl(y: &GraphNode, y_hat: &GraphNode) -> NnetResult<GraphNode> {
    elemwise_kl_with_options(y, y_hat, &LossOptions::default())
}

/// Elementwise KL divergence `Y·softplus(-Z) + (1 - Y)·softplus(Z)` where
/// `y_hat = σ(Z)`.
///
/// The result has the broadcast rank of `y` and `Z`. Errors are those of
/// [`kl_with_options`] minus the batch-axis check.
pub fn elemwise_kl_with_options(
    y: &GraphNode, y_hat: &GraphNode, opts: &LossOptions,
) -> NnetResult<GraphNode> {
    let z = find_sigmoid_argument(y_hat)?;
    check_target_domain(y, opts.validation)?;

    let term_1 = y * &softplus(&-z);
    let term_2 = &(1.0 - y) * &softplus(z);
    Ok(term_1 + term_2)
}
