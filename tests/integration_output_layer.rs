//! Integration tests for the logit-domain losses and ratios.
//!
//! Purpose
//! -------
//! - Evaluate the expressions recorded by `losses` with a reference
//!   evaluator and compare them with the naïve probability-domain formulas.
//! - Confirm the rebuilt expressions stay finite where the naïve ones
//!   overflow or produce `0 · ∞`.
//!
//! Coverage
//! --------
//! - `losses::kl` and `losses::elemwise_kl`:
//!   - Equality with the entropy of soft targets when `Y = σ(Z)`.
//!   - Near-zero divergence for saturated logits agreeing with binary
//!     targets.
//!   - Agreement with `-Y ln σ(Z) - (1 - Y) ln(1 - σ(Z))` on moderate logits
//!     and finiteness at `|Z| = 800`.
//! - `losses::softmax_ratio`:
//!   - `softmax(Z) / softmax(Z) = 1` and agreement with the eager ratio.
//! - `graph` + `numerical_stability`:
//!   - A printed softmax evaluates to the eager softmax.
//!
//! Exclusions
//! ----------
//! - Structural checks of the recorded graphs and error variants; those are
//!   covered by unit tests beside each module.
//! - Python bindings.
mod common;

use approx::assert_relative_eq;
use ndarray::{Array2, ArrayD, array};
use stable_logits::{
    NnetError,
    graph::{
        GraphNode,
        builders::{print, sigmoid, softmax},
    },
    losses::{LossOptions, elemwise_kl, kl, kl_with_options, softmax_ratio},
    numerical_stability::transformations::{self, safe_logistic},
};

use common::{bindings, evaluate};

fn logits() -> Array2<f64> {
    array![[-3.0, -0.5, 0.0, 1.25], [4.0, -2.0, 0.75, -6.0], [0.1, 2.5, -1.5, 3.0]]
}

/// Bernoulli entropy `-(p ln p + (1 - p) ln(1 - p))`.
fn entropy(p: f64) -> f64 {
    -(p * p.ln() + (1.0 - p) * (1.0 - p).ln())
}

#[test]
// Purpose
// -------
// Verify that kl(σ(Z), sigmoid(Z)) equals the mean entropy of the targets
// for each example.
//
// Given
// -----
// - Z: 3×4 moderate logits; Y = σ(Z) evaluated eagerly.
//
// Expect
// ------
// - kl[i] − mean_j H(Y[i, j]) ≈ 0 for every row i.
fn kl_of_matching_soft_targets_is_their_entropy() -> anyhow::Result<()> {
    // Arrange
    let z_val = logits();
    let y_val = z_val.mapv(safe_logistic);
    let z = GraphNode::input("z", 2);
    let y = GraphNode::input("y", 2);
    let env = bindings([("z", z_val.into_dyn()), ("y", y_val.clone().into_dyn())]);

    // Act
    let loss = evaluate(&kl(&y, &sigmoid(&z), 0)?, &env)?;

    // Assert
    assert_eq!(loss.shape(), &[3]);
    for (i, row) in y_val.rows().into_iter().enumerate() {
        let expected = row.mapv(entropy).mean().unwrap_or(f64::NAN);
        assert_relative_eq!(loss[[i]], expected, epsilon = 1e-12, max_relative = 1e-10);
    }
    Ok(())
}

#[test]
fn kl_of_saturated_agreeing_logits_is_near_zero() -> anyhow::Result<()> {
    let z_val = array![[30.0, -30.0, 45.0], [-40.0, 25.0, -35.0]];
    let y_val = z_val.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 });
    let z = GraphNode::input("z", 2);
    let y = GraphNode::input_with_value("y", y_val.into_dyn());
    let env = bindings([("z", z_val.into_dyn())]);

    let y_hat = print(&sigmoid(&z), "y_hat");
    let loss = evaluate(&kl_with_options(&y, &y_hat, 0, &LossOptions::checked())?, &env)?;

    assert_eq!(loss.shape(), &[2]);
    for &value in loss.iter() {
        assert!((0.0..1e-10).contains(&value), "Got: {value}");
    }
    Ok(())
}

#[test]
// Purpose
// -------
// Check the elementwise expression against the naïve cross-entropy form on
// logits where the naïve form is accurate.
//
// Given
// -----
// - Z: 3×4 moderate logits; Y: fixed soft targets in [0, 1].
//
// Expect
// ------
// - Values agree with `-Y ln σ(Z) - (1 - Y) ln(1 - σ(Z))`.
fn elemwise_kl_matches_naive_formula_on_moderate_logits() -> anyhow::Result<()> {
    // Arrange
    let z_val = logits();
    let y_val = array![[0.0, 0.2, 0.5, 1.0], [1.0, 0.0, 0.9, 0.1], [0.3, 0.7, 0.0, 1.0]];
    let z = GraphNode::input("z", 2);
    let y = GraphNode::input("y", 2);
    let env = bindings([("z", z_val.clone().into_dyn()), ("y", y_val.clone().into_dyn())]);

    // Act
    let value = evaluate(&elemwise_kl(&y, &sigmoid(&z))?, &env)?;

    // Assert
    let naive = ndarray::Zip::from(&y_val).and(&z_val).map_collect(|&t, &logit| {
        let p = 1.0 / (1.0 + (-logit).exp());
        -t * p.ln() - (1.0 - t) * (1.0 - p).ln()
    });
    assert_eq!(value.shape(), naive.shape());
    for (&got, &want) in value.iter().zip(naive.iter()) {
        assert_relative_eq!(got, want, epsilon = 1e-12, max_relative = 1e-9);
    }
    Ok(())
}

#[test]
fn elemwise_kl_stays_finite_for_extreme_logits() -> anyhow::Result<()> {
    let z_val = array![[800.0, -800.0], [-800.0, 800.0]];
    let y_val = array![[0.0, 1.0], [0.5, 1.0]];
    let z = GraphNode::input("z", 2);
    let y = GraphNode::input("y", 2);
    let env = bindings([("z", z_val.into_dyn()), ("y", y_val.into_dyn())]);

    let value = evaluate(&elemwise_kl(&y, &sigmoid(&z))?, &env)?;

    // Confidently wrong predictions cost |Z|; a correct one costs ~0.
    assert!(value.iter().all(|v| v.is_finite()), "Got: {value:?}");
    assert_relative_eq!(value[[0, 0]], 800.0);
    assert_relative_eq!(value[[0, 1]], 800.0);
    assert_relative_eq!(value[[1, 0]], 400.0);
    assert!(value[[1, 1]].abs() < 1e-12);
    Ok(())
}

#[test]
// Purpose
// -------
// Verify the stable ratio of a softmax with itself is exactly one up to
// rounding, including a printed numerator.
//
// Given
// -----
// - Z: 3×4 logits.
//
// Expect
// ------
// - Every entry of softmax_ratio(print(softmax(Z)), softmax(Z)) ≈ 1.
fn softmax_ratio_of_identical_softmaxes_is_one() -> anyhow::Result<()> {
    // Arrange
    let z = GraphNode::input("z", 2);
    let p = softmax(&z);
    let env = bindings([("z", logits().into_dyn())]);

    // Act
    let ratio = evaluate(&softmax_ratio(&print(&p, "p"), &p)?, &env)?;

    // Assert
    assert_eq!(ratio.shape(), &[3, 4]);
    for &value in ratio.iter() {
        assert_relative_eq!(value, 1.0, max_relative = 1e-12);
    }
    Ok(())
}

#[test]
fn softmax_ratio_matches_eager_ratio() -> anyhow::Result<()> {
    let zn_val = logits();
    let zd_val = array![[2.0, 0.0, -1.0, 0.5], [-3.0, 1.0, 1.0, 2.0], [0.0, 0.0, 0.0, 0.0]];
    let zn = GraphNode::input("zn", 2);
    let zd = GraphNode::input("zd", 2);
    let env = bindings([("zn", zn_val.clone().into_dyn()), ("zd", zd_val.clone().into_dyn())]);

    let ratio = evaluate(&softmax_ratio(&softmax(&zn), &softmax(&zd))?, &env)?;

    let eager: ArrayD<f64> =
        (transformations::softmax(&zn_val) / transformations::softmax(&zd_val)).into_dyn();
    for (&got, &want) in ratio.iter().zip(eager.iter()) {
        assert_relative_eq!(got, want, max_relative = 1e-10);
    }
    Ok(())
}

#[test]
fn printed_softmax_evaluates_to_reference_values() -> anyhow::Result<()> {
    let z = GraphNode::input_with_value("z", array![[1.0, 2.0, 3.0]].into_dyn());
    let p = evaluate(&print(&softmax(&z), "p"), &bindings([]))?;

    let expected = [0.09003057317038046, 0.24472847105479764, 0.6652409557748219];
    for (&got, &want) in p.iter().zip(expected.iter()) {
        assert_relative_eq!(got, want, max_relative = 1e-12);
    }
    Ok(())
}

#[test]
fn structural_errors_surface_before_any_evaluation() {
    let z = GraphNode::input("z", 2);
    let y = GraphNode::input("y", 2);

    let err = kl(&y, &softmax(&z), 0).unwrap_err();
    assert!(matches!(err, NnetError::NotRecognizedOperation { expected: "sigmoid", .. }));

    let err = softmax_ratio(&softmax(&z), &sigmoid(&z)).unwrap_err();
    assert!(matches!(err, NnetError::NotRecognizedOperation { expected: "softmax", .. }));
}
