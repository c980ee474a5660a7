//! losses::validation — probability-domain guard for loss targets.
//!
//! Purpose
//! -------
//! Check, when validation mode asks for it, that the realized values of a
//! target node lie in `[0, 1]` before a KL expression is built from it.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only values already attached to the node are inspected (an input's debug
//!   value or a constant). Computed targets carry no realized value and are
//!   skipped; nothing is evaluated here.
//! - NaN is treated as outside the domain.

use tracing::debug;

use crate::{
    errors::{NnetError, NnetResult},
    graph::GraphNode,
    losses::options::ValidationMode,
};

/// Validate that the realized values of `y` lie in `[0, 1]`.
///
/// Parameters
/// ----------
/// - `y`: `&GraphNode`
///   Target node.
/// - `mode`: `ValidationMode`
///   `Off` returns immediately.
///
/// Returns
/// -------
/// `NnetResult<()>`
///   `Ok(())` when the check is off, when no realized value is available, or
///   when every value is in range.
///
/// Errors
/// ------
/// - `NnetError::Domain { value }`
///   With the first offending value in iteration order.
pub fn check_target_domain(y: &GraphNode, mode: ValidationMode) -> NnetResult<()> {
    if !mode.is_checked() {
        return Ok(());
    }

    let offending = if let Some(values) = y.debug_value() {
        values.iter().copied().find(|v| !in_unit_interval(*v))
    } else if let Some(value) = y.constant_value() {
        Some(value).filter(|v| !in_unit_interval(*v))
    } else {
        debug!(node = %y.describe(), "no realized target value; skipping domain check");
        None
    };

    match offending {
        Some(value) => {
            debug!(value, "target value outside [0, 1]");
            Err(NnetError::Domain { value })
        }
        None => Ok(()),
    }
}

fn in_unit_interval(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}
