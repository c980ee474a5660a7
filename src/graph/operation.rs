//! Operation taxonomy for expression-graph nodes.
//!
//! Every computed [`GraphNode`](super::node::GraphNode) records the
//! [`Operation`] that produced it. The set is closed: introspection matches on
//! it exhaustively, and host operations this crate never inspects are carried
//! as [`Operation::Other`].

use std::fmt;

/// Scalar primitive applied elementwise with broadcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarPrimitive {
    /// Logistic sigmoid `1 / (1 + exp(-x))`.
    Sigmoid,
    /// Softplus `ln(1 + exp(x))`.
    Softplus,
    Exp,
    Log,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
}

impl ScalarPrimitive {
    /// Number of operands the primitive consumes.
    pub fn arity(&self) -> usize {
        match self {
            ScalarPrimitive::Sigmoid
            | ScalarPrimitive::Softplus
            | ScalarPrimitive::Exp
            | ScalarPrimitive::Log
            | ScalarPrimitive::Neg => 1,
            ScalarPrimitive::Add
            | ScalarPrimitive::Sub
            | ScalarPrimitive::Mul
            | ScalarPrimitive::Div => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScalarPrimitive::Sigmoid => "sigmoid",
            ScalarPrimitive::Softplus => "softplus",
            ScalarPrimitive::Exp => "exp",
            ScalarPrimitive::Log => "log",
            ScalarPrimitive::Neg => "neg",
            ScalarPrimitive::Add => "add",
            ScalarPrimitive::Sub => "sub",
            ScalarPrimitive::Mul => "mul",
            ScalarPrimitive::Div => "true_div",
        }
    }
}

/// Reduction kind for axis-wise reductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReduceKind {
    Sum,
    Max,
    Min,
    Mean,
}

impl ReduceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ReduceKind::Sum => "sum",
            ReduceKind::Max => "max",
            ReduceKind::Min => "min",
            ReduceKind::Mean => "mean",
        }
    }
}

/// Axis-wise reduction over `axes`, optionally keeping reduced axes as
/// length-1 dimensions so the result broadcasts against its input.
///
/// `axes` is sorted and free of duplicates when built through
/// [`Reduction::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reduction {
    pub kind: ReduceKind,
    pub axes: Vec<usize>,
    pub keepdims: bool,
}

impl Reduction {
    pub fn new(kind: ReduceKind, axes: &[usize], keepdims: bool) -> Self {
        let mut axes = axes.to_vec();
        axes.sort_unstable();
        axes.dedup();
        Reduction { kind, axes, keepdims }
    }
}

/// Operation that produced a computed node.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Row-wise softmax over the last axis of a rank-2 input.
    Softmax,
    /// Elementwise application of a scalar primitive.
    Elementwise(ScalarPrimitive),
    /// Debug print; forwards its single input unchanged.
    Print(String),
    Reduce(Reduction),
    /// Host operation this crate does not interpret.
    Other(String),
}

impl Operation {
    /// Whether the operation forwards its single input's value unchanged and
    /// must be skipped when tracing ancestry.
    pub fn is_passthrough(&self) -> bool {
        match self {
            Operation::Print(_) => true,
            Operation::Softmax
            | Operation::Elementwise(_)
            | Operation::Reduce(_)
            | Operation::Other(_) => false,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Softmax => write!(f, "Softmax"),
            Operation::Elementwise(prim) => write!(f, "Elemwise{{{}}}", prim.name()),
            Operation::Print(message) => write!(f, "Print{{{message}}}"),
            Operation::Reduce(red) => {
                write!(f, "Reduce{{{}, axes={:?}", red.kind.name(), red.axes)?;
                if red.keepdims {
                    write!(f, ", keepdims")?;
                }
                write!(f, "}}")
            }
            Operation::Other(name) => write!(f, "{name}"),
        }
    }
}
