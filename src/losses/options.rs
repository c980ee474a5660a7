//! Loss options — configuration for the logit-domain losses.
//!
//! Purpose
//! -------
//! Make the target-domain check an explicit, independently toggled switch
//! instead of a side effect of attaching debug values to graph inputs.
//!
//! Conventions
//! -----------
//! - [`ValidationMode::Off`] is the default: no realized values are
//!   inspected and losses only record graph structure.
//! - [`ValidationMode::Checked`] inspects whatever realized value the target
//!   node carries (an input's debug value or a constant) and rejects entries
//!   outside `[0, 1]`.

/// Whether realized target values are checked against `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Skip the check.
    #[default]
    Off,
    /// Check realized target values when available.
    Checked,
}

impl ValidationMode {
    pub fn is_checked(&self) -> bool {
        matches!(self, ValidationMode::Checked)
    }
}

/// LossOptions — configuration shared by `kl`, `elemwise_kl`, and their
/// `_with_options` variants.
///
/// Fields
/// ------
/// - `validation`: [`ValidationMode`]
///   Target-domain checking; defaults to `Off`.
///
/// Notes
/// -----
/// - The struct is `Copy` and cheap to pass by reference into every loss
///   call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LossOptions {
    pub validation: ValidationMode,
}

impl LossOptions {
    pub fn new(validation: ValidationMode) -> Self {
        LossOptions { validation }
    }

    /// Options with target-domain checking enabled.
    pub fn checked() -> Self {
        LossOptions { validation: ValidationMode::Checked }
    }
}
