//! graph — minimal expression-graph representation and introspection.
//!
//! Purpose
//! -------
//! Stand in for the host framework's symbolic graph: immutable, shared nodes
//! that remember the operation and inputs that produced them. The stable
//! losses in this crate never evaluate anything; they read node owners to
//! find logits and record new derived nodes.
//!
//! Key behaviors
//! -------------
//! - [`node`]: `GraphNode` handles, `Owner` links, leaf sources (named inputs
//!   with optional debug values, constants).
//! - [`operation`]: closed `Operation` tagged union, scalar primitives, and
//!   reductions.
//! - [`builders`]: constructors for `softmax`, `sigmoid`, `softplus`, `exp`,
//!   `log`, `print`, axis reductions, and `std::ops` arithmetic.
//! - [`introspection`]: `find_softmax_argument` / `find_sigmoid_argument`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Nodes are immutable after construction and `Send + Sync`.
//! - Builders record structure without validating shapes; introspection is
//!   where structural expectations are enforced.
//!
//! Downstream usage
//! ----------------
//! - Hosts build nodes with [`builders`] (or wrap their own operations as
//!   `Operation::Other`) and hand softmax/sigmoid outputs to
//!   [`crate::losses`].
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover rank inference, builder structure,
//!   and every introspection failure branch. Numeric behavior of built
//!   expressions is checked by the integration tests through a test-only
//!   evaluator.

pub mod builders;
pub mod introspection;
pub mod node;
pub mod operation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::introspection::{
    LOGIT_RANK, MAX_PASSTHROUGH_DEPTH, Nonlinearity, find_argument, find_sigmoid_argument,
    find_softmax_argument,
};
pub use self::node::{GraphNode, Owner, Source};
pub use self::operation::{Operation, ReduceKind, Reduction, ScalarPrimitive};

pub mod prelude {
    pub use super::builders;
    pub use super::introspection::{find_sigmoid_argument, find_softmax_argument};
    pub use super::node::GraphNode;
    pub use super::operation::{Operation, ScalarPrimitive};
}
