//! Reference evaluator for recorded expression graphs (test-only).
//!
//! Purpose
//! -------
//! The crate records graphs but never evaluates them. Integration tests need
//! numbers, so this module walks a [`GraphNode`] recursively and computes its
//! value with plain `ndarray` operations.
//!
//! Conventions
//! -----------
//! - Inputs are looked up in `bindings` by name first, then fall back to the
//!   node's debug value.
//! - Elementwise operations broadcast right-aligned, the same rule the
//!   crate uses for rank inference.
//! - Softplus and sigmoid use the crate's stable scalar helpers so the
//!   evaluator itself does not overflow.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use ndarray::{ArrayD, Axis, Ix2, IxDyn, Zip};
use stable_logits::{
    graph::{GraphNode, Operation, ReduceKind, Reduction, ScalarPrimitive, Source},
    numerical_stability::transformations::{safe_logistic, safe_softplus, softmax},
};

pub type Bindings = HashMap<String, ArrayD<f64>>;

/// Bind each `(name, value)` pair for [`evaluate`].
pub fn bindings<const N: usize>(pairs: [(&str, ArrayD<f64>); N]) -> Bindings {
    pairs.into_iter().map(|(name, value)| (name.to_string(), value)).collect()
}

/// Compute the value of `node` under `bindings`.
pub fn evaluate(node: &GraphNode, bindings: &Bindings) -> Result<ArrayD<f64>> {
    match node.source() {
        Source::Input { name, debug_value } => bindings
            .get(name)
            .or(debug_value.as_ref())
            .cloned()
            .with_context(|| format!("no value bound for input `{name}`")),
        Source::Constant(value) => Ok(ArrayD::from_elem(IxDyn(&[]), *value)),
        Source::Apply(owner) => {
            let args = owner
                .inputs
                .iter()
                .map(|input| evaluate(input, bindings))
                .collect::<Result<Vec<_>>>()?;
            apply(&owner.op, args)
        }
    }
}

fn apply(op: &Operation, mut args: Vec<ArrayD<f64>>) -> Result<ArrayD<f64>> {
    match op {
        Operation::Softmax => {
            let x = single(args)?.into_dimensionality::<Ix2>()?;
            Ok(softmax(&x).into_dyn())
        }
        Operation::Print(_) => single(args),
        Operation::Reduce(red) => reduce(red, single(args)?),
        Operation::Elementwise(prim) if prim.arity() == 1 => {
            let x = single(args)?;
            Ok(match prim {
                ScalarPrimitive::Sigmoid => x.mapv(safe_logistic),
                ScalarPrimitive::Softplus => x.mapv(safe_softplus),
                ScalarPrimitive::Exp => x.mapv(f64::exp),
                ScalarPrimitive::Log => x.mapv(f64::ln),
                ScalarPrimitive::Neg => x.mapv(|v| -v),
                other => bail!("{} is not unary", other.name()),
            })
        }
        Operation::Elementwise(prim) => {
            if args.len() != 2 {
                bail!("{} expects 2 inputs, got {}", prim.name(), args.len());
            }
            let b = args.pop().context("missing right operand")?;
            let a = args.pop().context("missing left operand")?;
            let f: fn(f64, f64) -> f64 = match prim {
                ScalarPrimitive::Add => |x, y| x + y,
                ScalarPrimitive::Sub => |x, y| x - y,
                ScalarPrimitive::Mul => |x, y| x * y,
                ScalarPrimitive::Div => |x, y| x / y,
                other => bail!("{} is not binary", other.name()),
            };
            zip_broadcast(&a, &b, f)
        }
        Operation::Other(name) => bail!("cannot evaluate host operation {name}"),
    }
}

fn single(mut args: Vec<ArrayD<f64>>) -> Result<ArrayD<f64>> {
    match (args.pop(), args.is_empty()) {
        (Some(only), true) => Ok(only),
        _ => bail!("expected exactly one input"),
    }
}

fn reduce(red: &Reduction, mut x: ArrayD<f64>) -> Result<ArrayD<f64>> {
    // Highest axis first so lower indices stay valid when axes are dropped.
    for &axis in red.axes.iter().rev() {
        if axis >= x.ndim() {
            bail!("axis {axis} out of range for rank {}", x.ndim());
        }
        let ax = Axis(axis);
        let reduced = match red.kind {
            ReduceKind::Sum => x.sum_axis(ax),
            ReduceKind::Mean => x.mean_axis(ax).context("mean over an empty axis")?,
            ReduceKind::Max => x.fold_axis(ax, f64::NEG_INFINITY, |&acc, &v| acc.max(v)),
            ReduceKind::Min => x.fold_axis(ax, f64::INFINITY, |&acc, &v| acc.min(v)),
        };
        x = if red.keepdims { reduced.insert_axis(ax) } else { reduced };
    }
    Ok(x)
}

fn zip_broadcast(a: &ArrayD<f64>, b: &ArrayD<f64>, f: fn(f64, f64) -> f64) -> Result<ArrayD<f64>> {
    let shape = broadcast_shape(a.shape(), b.shape())?;
    let a = a.broadcast(IxDyn(&shape)).context("left operand does not broadcast")?;
    let b = b.broadcast(IxDyn(&shape)).context("right operand does not broadcast")?;
    Ok(Zip::from(&a).and(&b).map_collect(|&x, &y| f(x, y)))
}

fn broadcast_shape(a: &[usize], b: &[usize]) -> Result<Vec<usize>> {
    let ndim = a.len().max(b.len());
    let dim_at = |shape: &[usize], i: usize| {
        let offset = ndim - shape.len();
        if i < offset { 1 } else { shape[i - offset] }
    };
    (0..ndim)
        .map(|i| match (dim_at(a, i), dim_at(b, i)) {
            (m, n) if m == n => Ok(m),
            (1, n) => Ok(n),
            (m, 1) => Ok(m),
            (m, n) => bail!("shapes {a:?} and {b:?} do not broadcast ({m} vs {n})"),
        })
        .collect()
}
