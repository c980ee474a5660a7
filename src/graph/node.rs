//! Graph node definitions for expression-graph representation.
//!
//! A [`GraphNode`] is a reference-counted handle to an immutable expression.
//! Nodes are either leaves (named inputs, scalar constants) or carry an
//! [`Owner`] recording the [`Operation`] and ordered inputs that produced
//! them. Handles are shared freely; equality is identity.

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use ndarray::ArrayD;

use super::operation::{Operation, ReduceKind};

// ============================================================================
// Owner
// ============================================================================

/// Association of a computed node with the operation that produced it and
/// its ordered inputs.
#[derive(Debug)]
pub struct Owner {
    pub op: Operation,
    pub inputs: Vec<GraphNode>,
}

// ============================================================================
// Source
// ============================================================================

/// Where a node's value comes from.
#[derive(Debug)]
pub enum Source {
    /// Named graph input, optionally carrying a realized debug value.
    Input { name: String, debug_value: Option<ArrayD<f64>> },
    /// Rank-0 literal.
    Constant(f64),
    /// Result of applying an operation.
    Apply(Owner),
}

#[derive(Debug)]
struct NodeInner {
    source: Source,
    ndim: usize,
}

// ============================================================================
// GraphNode
// ============================================================================

/// Expression-graph node (reference-counted, immutable).
///
/// Uses `Arc` so the same node can be referenced by many downstream nodes
/// and handed across threads.
#[derive(Clone)]
pub struct GraphNode(Arc<NodeInner>);

impl fmt::Debug for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphNode")
            .field("source", &self.describe())
            .field("ndim", &self.0.ndim)
            .finish()
    }
}

impl PartialEq for GraphNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for GraphNode {}

impl Hash for GraphNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl GraphNode {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Named input of rank `ndim` with no realized value.
    pub fn input(name: impl Into<String>, ndim: usize) -> Self {
        Self::from_source(Source::Input { name: name.into(), debug_value: None }, ndim)
    }

    /// Named input carrying a realized debug value; the rank is taken from
    /// the value.
    pub fn input_with_value(name: impl Into<String>, value: ArrayD<f64>) -> Self {
        let ndim = value.ndim();
        Self::from_source(Source::Input { name: name.into(), debug_value: Some(value) }, ndim)
    }

    pub fn constant(value: f64) -> Self {
        Self::from_source(Source::Constant(value), 0)
    }

    /// Apply `op` to `inputs`, inferring the output rank.
    ///
    /// Elementwise operations broadcast right-aligned, so the output rank is
    /// the largest input rank. Softmax, print, and host operations keep the
    /// (largest) input rank; reductions drop one rank per reduced axis unless
    /// `keepdims` is set. No validation is performed here: recording
    /// structure is the builder's only job, and introspection validates.
    pub fn apply(op: Operation, inputs: Vec<GraphNode>) -> Self {
        let widest = inputs.iter().map(GraphNode::ndim).max().unwrap_or(0);
        let ndim = match &op {
            Operation::Reduce(red) if !red.keepdims => {
                let dropped = red.axes.iter().filter(|&&axis| axis < widest).count();
                widest - dropped
            }
            Operation::Softmax
            | Operation::Elementwise(_)
            | Operation::Print(_)
            | Operation::Reduce(_)
            | Operation::Other(_) => widest,
        };
        Self::from_source(Source::Apply(Owner { op, inputs }), ndim)
    }

    /// Host operation this crate does not interpret, with an explicit rank.
    pub fn other(name: impl Into<String>, inputs: Vec<GraphNode>, ndim: usize) -> Self {
        Self::from_source(Source::Apply(Owner { op: Operation::Other(name.into()), inputs }), ndim)
    }

    fn from_source(source: Source, ndim: usize) -> Self {
        GraphNode(Arc::new(NodeInner { source, ndim }))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn ndim(&self) -> usize {
        self.0.ndim
    }

    pub fn source(&self) -> &Source {
        &self.0.source
    }

    /// The producing operation and inputs, or `None` for leaves.
    pub fn owner(&self) -> Option<&Owner> {
        match &self.0.source {
            Source::Apply(owner) => Some(owner),
            Source::Input { .. } | Source::Constant(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.owner().is_none()
    }

    pub fn name(&self) -> Option<&str> {
        match &self.0.source {
            Source::Input { name, .. } => Some(name),
            Source::Constant(_) | Source::Apply(_) => None,
        }
    }

    /// Realized value attached to an input, if any.
    pub fn debug_value(&self) -> Option<&ArrayD<f64>> {
        match &self.0.source {
            Source::Input { debug_value, .. } => debug_value.as_ref(),
            Source::Constant(_) | Source::Apply(_) => None,
        }
    }

    pub fn constant_value(&self) -> Option<f64> {
        match &self.0.source {
            Source::Constant(value) => Some(*value),
            Source::Input { .. } | Source::Apply(_) => None,
        }
    }

    /// Short human-readable description of what produced this node.
    pub fn describe(&self) -> String {
        match &self.0.source {
            Source::Input { name, .. } => format!("input `{name}` (a leaf with no owner)"),
            Source::Constant(value) => format!("constant {value} (a leaf with no owner)"),
            Source::Apply(owner) => owner.op.to_string(),
        }
    }

    /// Whether the node is a reduction of the given kind.
    pub fn is_reduction(&self, kind: ReduceKind) -> bool {
        matches!(self.owner(), Some(Owner { op: Operation::Reduce(red), .. }) if red.kind == kind)
    }
}
