//! losses — logit-domain losses and ratios built from recovered logits.
//!
//! Purpose
//! -------
//! Re-derive probability-domain quantities algebraically in terms of the
//! pre-activation logits so the recorded expressions stay well-conditioned
//! when probabilities saturate near 0 or 1.
//!
//! Key behaviors
//! -------------
//! - [`kl`]: Bernoulli KL divergence against sigmoid outputs, aggregated per
//!   example ([`kl::kl`]) or elementwise ([`kl::elemwise_kl`]).
//! - [`ratio`]: elementwise ratio of two softmax outputs
//!   ([`ratio::softmax_ratio`]).
//! - [`options`] / [`validation`]: explicit target-domain checking, off by
//!   default.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every entry point first recovers logits through
//!   [`crate::graph::introspection`]; its errors surface unchanged.
//! - All validation happens before the first derived node is recorded, so a
//!   failing call never leaves partial results behind.
//! - Inputs are never mutated; results are fresh nodes sharing the inputs.
//!
//! Downstream usage
//! ----------------
//! - Training code uses the returned nodes as cost terms; monitoring code
//!   averages `kl` over the batch axis for reporting.
//!
//! Testing notes
//! -------------
//! - Unit tests check expression structure and error propagation.
//! - `tests/integration_output_layer.rs` evaluates the recorded expressions
//!   and compares them with naïve probability-domain formulas.

pub mod kl;
pub mod options;
pub mod ratio;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::kl::{elemwise_kl, elemwise_kl_with_options, kl, kl_with_options};
pub use self::options::{LossOptions, ValidationMode};
pub use self::ratio::softmax_ratio;
pub use self::validation::check_target_domain;

pub mod prelude {
    pub use super::kl::{elemwise_kl, elemwise_kl_with_options, kl, kl_with_options};
    pub use super::options::{LossOptions, ValidationMode};
    pub use super::ratio::softmax_ratio;
}
