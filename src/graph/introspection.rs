//! introspection — recover pre-activation arguments by tracing node owners.
//!
//! Purpose
//! -------
//! Given a node believed to be the output of a softmax or sigmoid, walk back
//! through its owner to the logit node that was fed into the nonlinearity.
//! Stable losses and ratios are expressed in terms of these logits.
//!
//! Key behaviors
//! -------------
//! - Unwrap at most [`MAX_PASSTHROUGH_DEPTH`] transparent passthrough layers
//!   (debug prints) before checking the operation.
//! - Match the producing operation exhaustively against the expected
//!   [`Nonlinearity`].
//! - Require the recovered argument to have rank 2 (batch × units).
//!
//! Invariants & assumptions
//! ------------------------
//! - Pure query: the returned node is a borrow of the very input recorded in
//!   the owner, never a copy, and no owner link is modified.
//! - At most `MAX_PASSTHROUGH_DEPTH + 1` owner hops are taken.
//!
//! Conventions
//! -----------
//! - Failures are reported as `NotRecognizedOperation`, `Arity`, or `Rank`
//!   and are meant to propagate unchanged through callers.

use tracing::{debug, trace};

use crate::{
    errors::{NnetError, NnetResult},
    graph::{
        node::{GraphNode, Owner},
        operation::{Operation, ScalarPrimitive},
    },
};

/// Number of transparent passthrough layers unwrapped before the
/// nonlinearity check.
pub const MAX_PASSTHROUGH_DEPTH: usize = 1;

/// Rank required of a recovered logit argument.
pub const LOGIT_RANK: usize = 2;

/// Nonlinearity whose argument is being traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nonlinearity {
    Softmax,
    Sigmoid,
}

impl Nonlinearity {
    pub fn name(&self) -> &'static str {
        match self {
            Nonlinearity::Softmax => "softmax",
            Nonlinearity::Sigmoid => "sigmoid",
        }
    }

    /// Whether `op` is this nonlinearity.
    pub fn matches(&self, op: &Operation) -> bool {
        match (self, op) {
            (Nonlinearity::Softmax, Operation::Softmax) => true,
            (Nonlinearity::Sigmoid, Operation::Elementwise(ScalarPrimitive::Sigmoid)) => true,
            (
                _,
                Operation::Softmax
                | Operation::Elementwise(_)
                | Operation::Print(_)
                | Operation::Reduce(_)
                | Operation::Other(_),
            ) => false,
        }
    }
}

/// Return the argument `Z` of `node = softmax(Z)`.
///
/// Parameters
/// ----------
/// - `node`: `&GraphNode`
///   Softmax output, optionally wrapped once in a debug print.
///
/// Returns
/// -------
/// `NnetResult<&GraphNode>`
///   The rank-2 node passed to the softmax, borrowed from `node`'s ancestry.
///
/// Errors
/// ------
/// - `NnetError::NotRecognizedOperation`
///   The (unwrapped) node is a leaf or was produced by another operation.
/// - `NnetError::Arity`
///   A print or softmax owner does not have exactly one input.
/// - `NnetError::Rank`
///   The softmax argument is not rank 2.
///
/// Examples
/// --------
/// ```rust
/// # use stable_logits::graph::{GraphNode, builders, find_softmax_argument};
/// let z = GraphNode::input("z", 2);
/// let p = builders::print(&builders::softmax(&z), "probs");
/// assert_eq!(find_softmax_argument(&p).unwrap(), &z);
/// ```
pub fn find_softmax_argument(node: &GraphNode) -> NnetResult<&GraphNode> {
    find_argument(node, Nonlinearity::Softmax)
}

/// Return the argument `Z` of `node = sigmoid(Z)`.
///
/// Same contract as [`find_softmax_argument`], but the producing operation
/// must be the elementwise sigmoid primitive.
pub fn find_sigmoid_argument(node: &GraphNode) -> NnetResult<&GraphNode> {
    find_argument(node, Nonlinearity::Sigmoid)
}

/// Trace `node` back through `expected` to its rank-2 argument.
pub fn find_argument(node: &GraphNode, expected: Nonlinearity) -> NnetResult<&GraphNode> {
    let node = strip_passthrough(node)?;

    let owner = match node.owner() {
        Some(owner) if expected.matches(&owner.op) => owner,
        _ => {
            let found = node.describe();
            debug!(expected = expected.name(), %found, "not a recognized nonlinearity output");
            return Err(NnetError::NotRecognizedOperation { expected: expected.name(), found });
        }
    };

    let arg = sole_input(owner)?;
    if arg.ndim() != LOGIT_RANK {
        debug!(expected = expected.name(), rank = arg.ndim(), "logit argument has wrong rank");
        return Err(NnetError::Rank { expected: LOGIT_RANK, found: arg.ndim() });
    }
    trace!(nonlinearity = expected.name(), "recovered logit argument");
    Ok(arg)
}

/// Replace `node` with its single input while it is a passthrough, for at
/// most [`MAX_PASSTHROUGH_DEPTH`] layers.
fn strip_passthrough(node: &GraphNode) -> NnetResult<&GraphNode> {
    let mut current = node;
    for _ in 0..MAX_PASSTHROUGH_DEPTH {
        match current.owner() {
            Some(owner) if owner.op.is_passthrough() => current = sole_input(owner)?,
            _ => break,
        }
    }
    Ok(current)
}

fn sole_input(owner: &Owner) -> NnetResult<&GraphNode> {
    match owner.inputs.as_slice() {
        [only] => Ok(only),
        inputs => Err(NnetError::Arity {
            op: owner.op.to_string(),
            expected: 1,
            found: inputs.len(),
        }),
    }
}
