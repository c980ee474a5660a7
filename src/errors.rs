//! errors — crate-wide error surface for introspection, losses, and metrics.
//!
//! Purpose
//! -------
//! Provide a single error enum and result alias shared by graph
//! introspection, the logit-domain losses, and metric configuration. Losses
//! and ratios surface introspection failures unchanged.
//!
//! Key behaviors
//! -------------
//! - Define [`NnetError`] and [`NnetResult`] as the canonical error/result pair.
//! - Attach human-readable `Display` messages that embed the offending payload
//!   (operation description, rank, value, axis).
//! - Under the `python-bindings` feature, map every variant to a
//!   `PyValueError` carrying the `Display` message.
//!
//! Invariants & assumptions
//! ------------------------
//! - All variants are structural validation failures detected before any
//!   output node or array is produced; none of them is transient.
//! - Degenerate metric denominators are handled by a floor and never produce
//!   an error.
//!
//! Testing notes
//! -------------
//! - Unit tests check that each `Display` message embeds its payload.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type NnetResult<T> = Result<T, NnetError>;

/// NnetError — failure conditions for the stable-logit toolbox.
///
/// Variants
/// --------
/// - `NotRecognizedOperation { expected, found }`
///   The node's ancestry does not match the expected nonlinearity after at
///   most one transparent unwrap. `found` describes the actual operation (or
///   reports that the node is a leaf).
/// - `Rank { expected, found }`
///   The pre-activation argument does not have the expected rank.
/// - `Arity { op, expected, found }`
///   A single-input operation was recorded with a different input count.
/// - `Domain { value }`
///   A probability target lies outside `[0, 1]` (or is NaN). Only raised when
///   validation mode is enabled.
/// - `InvalidBatchAxis { axis, ndim }`
///   The batch axis does not index the KL expression.
/// - `InvalidDenominatorFloor { value }`
///   A metric denominator floor that is not finite and strictly positive.
/// - `ShapeMismatch { expected, found }`
///   Target and score arrays passed to metric helpers differ in shape.
#[derive(Debug, Clone, PartialEq)]
pub enum NnetError {
    // ---- Graph introspection ----
    NotRecognizedOperation { expected: &'static str, found: String },
    Rank { expected: usize, found: usize },
    Arity { op: String, expected: usize, found: usize },

    // ---- Losses ----
    Domain { value: f64 },
    InvalidBatchAxis { axis: usize, ndim: usize },

    // ---- Metrics ----
    InvalidDenominatorFloor { value: f64 },
    ShapeMismatch { expected: Vec<usize>, found: Vec<usize> },
}

impl std::error::Error for NnetError {}

impl std::fmt::Display for NnetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Graph introspection ----
            NnetError::NotRecognizedOperation { expected, found } => write!(
                f,
                "Expected the output of a {expected}, but it appears to be the output of {found}"
            ),
            NnetError::Rank { expected, found } => {
                write!(f, "Expected a rank-{expected} argument, found rank {found}")
            }
            NnetError::Arity { op, expected, found } => {
                write!(f, "Operation {op} expects {expected} input(s), found {found}")
            }

            // ---- Losses ----
            NnetError::Domain { value } => write!(
                f,
                "Expected targets to lie in [0, 1], found {value}. Either Y < 0 or Y > 1 was found in the input."
            ),
            NnetError::InvalidBatchAxis { axis, ndim } => {
                write!(f, "Invalid batch axis {axis} for an expression of rank {ndim}")
            }

            // ---- Metrics ----
            NnetError::InvalidDenominatorFloor { value } => {
                write!(f, "Invalid denominator floor {value}: must be finite and > 0")
            }
            NnetError::ShapeMismatch { expected, found } => {
                write!(f, "Shape mismatch: expected {expected:?}, found {found:?}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<NnetError> for PyErr {
    fn from(err: NnetError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
