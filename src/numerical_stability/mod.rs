//! numerical_stability — eager nonlinearities and their stable inverses.
//!
//! Purpose
//! -------
//! Collect the realized-array counterparts of the output-layer
//! nonlinearities: row-wise softmax, the logistic sigmoid, and the inverses
//! used to move from the probability domain back to the logit domain. Also
//! hosts the scalar `safe_softplus` / `safe_logistic` helpers that define the
//! numeric meaning of the graph `Softplus` and `Sigmoid` primitives.
//!
//! Key behaviors
//! -------------
//! - Stabilize softmax by subtracting each row's maximum before
//!   exponentiating.
//! - Resolve the shift ambiguity of the softmax inverse by returning the
//!   zero-mean logits.
//! - Keep scalar softplus/logistic finite across the whole real line.
//!
//! Invariants & assumptions
//! ------------------------
//! - Functions are total over finite inputs; boundary inputs (`p ∈ {0, 1}`
//!   for the inverses) produce infinities rather than errors.
//! - Inputs are never mutated; every transform returns a fresh array.
//!
//! Conventions
//! -----------
//! - All routines operate on `ndarray` types and are generic over the storage
//!   (`ArrayBase<S, D>` with `S: Data<Elem = f64>`), so owned arrays and views
//!   are accepted alike.
//! - This module never logs, performs I/O, or touches global state.
//!
//! Downstream usage
//! ----------------
//! - Monitoring code uses `softmax`/`sigmoid` on realized batches and the
//!   inverses to initialize biases from target marginals.
//! - The Python bindings forward to these functions directly.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with naïve formulas,
//!   tail behavior, row normalization, and round trips.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    SOFTPLUS_CUTOFF, inverse_sigmoid, pseudoinverse_softmax, safe_logistic, safe_softplus,
    sigmoid, softmax,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use stable_logits::numerical_stability::prelude::*;
//
// to import the eager transforms in a single line.

pub mod prelude {
    pub use super::transformations::{
        inverse_sigmoid, pseudoinverse_softmax, safe_logistic, safe_softplus, sigmoid, softmax,
    };
}
