//! Binary classification metrics with floored denominators.
//!
//! Precision, recall, and F1 divide by counts that are zero in degenerate
//! batches (no positive predictions, no positive targets). Each denominator
//! is floored at [`DENOMINATOR_FLOOR`] instead, so the metrics are total
//! functions: a degenerate batch reports 0 rather than NaN. With the default
//! floor of 1 the metric slightly underestimates when a denominator lies in
//! `(0, 1)`, which only happens for soft counts.

use ndarray::{ArrayBase, Data, Dimension, Zip};

use crate::errors::{NnetError, NnetResult};

/// Default lower bound applied to every metric denominator.
pub const DENOMINATOR_FLOOR: f64 = 1.0;

/// Default decision threshold for [`ConfusionCounts::from_scores`].
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// `tp / max(1, tp + fp)`.
pub fn precision(tp: f64, fp: f64) -> f64 {
    MetricPolicy::default().precision(tp, fp)
}

/// `tp / max(1, sum(y))`.
pub fn recall<S, D>(y: &ArrayBase<S, D>, tp: f64) -> f64
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    MetricPolicy::default().recall(y, tp)
}

/// `2 · precision · recall / max(1, precision + recall)`.
pub fn f1(precision: f64, recall: f64) -> f64 {
    MetricPolicy::default().f1(precision, recall)
}

/// MetricPolicy — denominator floor used by the metric helpers.
///
/// Invariants
/// ----------
/// - `denominator_floor` is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPolicy {
    denominator_floor: f64,
}

impl Default for MetricPolicy {
    fn default() -> Self {
        MetricPolicy { denominator_floor: DENOMINATOR_FLOOR }
    }
}

impl MetricPolicy {
    /// Construct a policy with a custom denominator floor.
    ///
    /// Errors
    /// ------
    /// - `NnetError::InvalidDenominatorFloor`
    ///   When `floor` is not finite or `floor <= 0.0`.
    pub fn new(floor: f64) -> NnetResult<Self> {
        if !floor.is_finite() || floor <= 0.0 {
            return Err(NnetError::InvalidDenominatorFloor { value: floor });
        }
        Ok(MetricPolicy { denominator_floor: floor })
    }

    pub fn denominator_floor(&self) -> f64 {
        self.denominator_floor
    }

    pub fn precision(&self, tp: f64, fp: f64) -> f64 {
        tp / self.floored(tp + fp)
    }

    pub fn recall<S, D>(&self, y: &ArrayBase<S, D>, tp: f64) -> f64
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        tp / self.floored(y.sum())
    }

    pub fn f1(&self, precision: f64, recall: f64) -> f64 {
        2.0 * precision * recall / self.floored(precision + recall)
    }

    /// Threshold `y_hat`, count against `y`, and compute all three metrics.
    ///
    /// Errors
    /// ------
    /// - `NnetError::ShapeMismatch` when `y` and `y_hat` differ in shape.
    pub fn report<S1, S2, D>(
        &self, y: &ArrayBase<S1, D>, y_hat: &ArrayBase<S2, D>, threshold: f64,
    ) -> NnetResult<ClassificationReport>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D: Dimension,
    {
        let counts = ConfusionCounts::from_scores(y, y_hat, threshold)?;
        let precision = self.precision(counts.true_positives, counts.false_positives);
        let recall = self.recall(y, counts.true_positives);
        let f1 = self.f1(precision, recall);
        Ok(ClassificationReport { precision, recall, f1 })
    }

    fn floored(&self, denominator: f64) -> f64 {
        denominator.max(self.denominator_floor)
    }
}

/// Confusion-matrix counts for binary decisions.
///
/// Counts are sums of target mass, so soft targets in `[0, 1]` contribute
/// fractionally: `tp = Σ y·ŷ_bin`, `fp = Σ (1 - y)·ŷ_bin`, and so on, where
/// `ŷ_bin = 1` when the score exceeds the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfusionCounts {
    pub true_positives: f64,
    pub false_positives: f64,
    pub false_negatives: f64,
    pub true_negatives: f64,
}

impl ConfusionCounts {
    /// Count decisions `y_hat > threshold` against targets `y`.
    ///
    /// Errors
    /// ------
    /// - `NnetError::ShapeMismatch` when the shapes differ.
    pub fn from_scores<S1, S2, D>(
        y: &ArrayBase<S1, D>, y_hat: &ArrayBase<S2, D>, threshold: f64,
    ) -> NnetResult<Self>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D: Dimension,
    {
        if y.shape() != y_hat.shape() {
            return Err(NnetError::ShapeMismatch {
                expected: y.shape().to_vec(),
                found: y_hat.shape().to_vec(),
            });
        }

        let mut counts = ConfusionCounts::default();
        Zip::from(y).and(y_hat).for_each(|&target, &score| {
            let predicted = if score > threshold { 1.0 } else { 0.0 };
            counts.true_positives += target * predicted;
            counts.false_positives += (1.0 - target) * predicted;
            counts.false_negatives += target * (1.0 - predicted);
            counts.true_negatives += (1.0 - target) * (1.0 - predicted);
        });
        Ok(counts)
    }
}

/// Precision, recall, and F1 for one batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationReport {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}
