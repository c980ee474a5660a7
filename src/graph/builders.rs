//! Builders for the primitives used by the logit-domain formulas.
//!
//! Builders only record structure: each call returns a fresh [`GraphNode`]
//! whose owner references the given inputs. Arithmetic on `&GraphNode` is
//! available through the `std::ops` traits, so `&a - &b` records an
//! `Elemwise{sub}` node.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::{
    node::GraphNode,
    operation::{Operation, ReduceKind, Reduction, ScalarPrimitive},
};

fn unary(prim: ScalarPrimitive, x: &GraphNode) -> GraphNode {
    GraphNode::apply(Operation::Elementwise(prim), vec![x.clone()])
}

fn binary(prim: ScalarPrimitive, a: &GraphNode, b: &GraphNode) -> GraphNode {
    GraphNode::apply(Operation::Elementwise(prim), vec![a.clone(), b.clone()])
}

fn reduce(kind: ReduceKind, x: &GraphNode, axes: &[usize], keepdims: bool) -> GraphNode {
    GraphNode::apply(Operation::Reduce(Reduction::new(kind, axes, keepdims)), vec![x.clone()])
}

// ---- Nonlinearities --------------------------------------------------------

/// Row-wise softmax of a rank-2 `x`.
pub fn softmax(x: &GraphNode) -> GraphNode {
    GraphNode::apply(Operation::Softmax, vec![x.clone()])
}

pub fn sigmoid(x: &GraphNode) -> GraphNode {
    unary(ScalarPrimitive::Sigmoid, x)
}

pub fn softplus(x: &GraphNode) -> GraphNode {
    unary(ScalarPrimitive::Softplus, x)
}

pub fn exp(x: &GraphNode) -> GraphNode {
    unary(ScalarPrimitive::Exp, x)
}

pub fn log(x: &GraphNode) -> GraphNode {
    unary(ScalarPrimitive::Log, x)
}

/// Transparent debug print of `x`.
pub fn print(x: &GraphNode, message: impl Into<String>) -> GraphNode {
    GraphNode::apply(Operation::Print(message.into()), vec![x.clone()])
}

// ---- Reductions ------------------------------------------------------------

pub fn sum(x: &GraphNode, axes: &[usize], keepdims: bool) -> GraphNode {
    reduce(ReduceKind::Sum, x, axes, keepdims)
}

pub fn max(x: &GraphNode, axes: &[usize], keepdims: bool) -> GraphNode {
    reduce(ReduceKind::Max, x, axes, keepdims)
}

pub fn min(x: &GraphNode, axes: &[usize], keepdims: bool) -> GraphNode {
    reduce(ReduceKind::Min, x, axes, keepdims)
}

/// Mean over `axes`. Reducing over no axes returns `x` itself.
pub fn mean(x: &GraphNode, axes: &[usize], keepdims: bool) -> GraphNode {
    if axes.is_empty() {
        return x.clone();
    }
    reduce(ReduceKind::Mean, x, axes, keepdims)
}

// ---- Arithmetic ------------------------------------------------------------

impl Neg for &GraphNode {
    type Output = GraphNode;

    fn neg(self) -> GraphNode {
        unary(ScalarPrimitive::Neg, self)
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $prim:expr) => {
        impl $trait<&GraphNode> for &GraphNode {
            type Output = GraphNode;

            fn $method(self, rhs: &GraphNode) -> GraphNode {
                binary($prim, self, rhs)
            }
        }

        impl $trait<GraphNode> for GraphNode {
            type Output = GraphNode;

            fn $method(self, rhs: GraphNode) -> GraphNode {
                binary($prim, &self, &rhs)
            }
        }

        impl $trait<f64> for &GraphNode {
            type Output = GraphNode;

            fn $method(self, rhs: f64) -> GraphNode {
                binary($prim, self, &GraphNode::constant(rhs))
            }
        }

        impl $trait<&GraphNode> for f64 {
            type Output = GraphNode;

            fn $method(self, rhs: &GraphNode) -> GraphNode {
                binary($prim, &GraphNode::constant(self), rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, ScalarPrimitive::Add);
impl_binary_op!(Sub, sub, ScalarPrimitive::Sub);
impl_binary_op!(Mul, mul, ScalarPrimitive::Mul);
impl_binary_op!(Div, div, ScalarPrimitive::Div);
