//! losses::ratio — stable elementwise ratio of two softmax outputs.
//!
//! Given `numer = softmax(Zn)` and `denom = softmax(Zd)`, the ratio
//! `numer / denom` is rebuilt from the logits as
//!
//! ```text
//! exp(Zn' − Zd') · rowsum(exp(Zd')) / rowsum(exp(Zn'))
//! ```
//!
//! with `Zn' = Zn − rowmax(Zn)` and `Zd' = Zd − rowmin(Zd)`. After the
//! shifts `Zn' ≤ 0` and `Zd' ≥ 0`, so `exp(Zn' − Zd') ≤ 1` and the cross term
//! cannot overflow; neither softmax is ever materialized.

use tracing::trace;

use crate::{
    errors::NnetResult,
    graph::{
        GraphNode,
        builders::{exp, max, min, sum},
        find_softmax_argument,
    },
};

/// Class axis of the rank-2 logits.
const CLASS_AXIS: usize = 1;

/// Numerically stable `numer / denom` for two softmax outputs.
///
/// Parameters
/// ----------
/// - `numer`, `denom`: `&GraphNode`
///   Outputs of graph softmaxes over rank-2 logits, each optionally wrapped
///   once in a print.
///
/// Returns
/// -------
/// `NnetResult<GraphNode>`
///   Rank-2 node algebraically equal to `softmax(Zn) / softmax(Zd)`.
///
/// Errors
/// ------
/// - Any error of [`find_softmax_argument`] for either input, unchanged
///   (the numerator is inspected first).
pub fn softmax_ratio(numer: &GraphNode, denom: &GraphNode) -> NnetResult<GraphNode> {
    let numer_z = find_softmax_argument(numer)?;
    let denom_z = find_softmax_argument(denom)?;

    let numer_z = numer_z - &max(numer_z, &[CLASS_AXIS], true);
    let denom_z = denom_z - &min(denom_z, &[CLASS_AXIS], true);

    let new_num = &exp(&(&numer_z - &denom_z)) * &sum(&exp(&denom_z), &[CLASS_AXIS], true);
    let new_den = sum(&exp(&numer_z), &[CLASS_AXIS], true);

    trace!("recorded stable softmax ratio");
    Ok(new_num / new_den)
}
