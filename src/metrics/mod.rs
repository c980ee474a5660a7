//! metrics — precision, recall, and F1 for binary output layers.
//!
//! Purpose
//! -------
//! Provide the monitoring metrics reported alongside sigmoid output layers,
//! computed eagerly on realized counts and target arrays.
//!
//! Key behaviors
//! -------------
//! - `precision`, `recall`, `f1` with denominators floored at
//!   [`DENOMINATOR_FLOOR`] so degenerate batches report 0 instead of NaN.
//! - [`MetricPolicy`] overrides the floor; [`ConfusionCounts`] and
//!   [`ClassificationReport`] go from scores to all three metrics at once.
//!
//! Invariants & assumptions
//! ------------------------
//! - The metric functions never fail. Only policy construction (invalid
//!   floor) and count construction (shape mismatch) return errors.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`classification`] cover the degenerate cases, ordinary
//!   values, floor overrides, and confusion counting.

pub mod classification;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::classification::{
    ClassificationReport, ConfusionCounts, DEFAULT_THRESHOLD, DENOMINATOR_FLOOR, MetricPolicy, f1,
    precision, recall,
};

pub mod prelude {
    pub use super::classification::{
        ClassificationReport, ConfusionCounts, MetricPolicy, f1, precision, recall,
    };
}
