//! Split Policy
//!
//! Decides the cases where proportional allocation alone is undefined.
//! Loaded from JSON; every field is optional.

use serde::{Deserialize, Serialize};

use crate::domain::{SplitError, SplitResult};

/// Rounding tolerance used by conservation checks
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// What happens to tax and tip when the allocation basis is zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroSubtotalPolicy {
    /// Split tax + tip evenly across everyone at the table
    #[default]
    EvenSplit,
    /// Leave tax and tip unallocated
    Unallocated,
}

/// What happens when an item is assigned to an id that isn't on the bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownAssigneePolicy {
    #[default]
    Reject,
    /// Skip the id: it neither pays nor counts towards the split divisor
    Ignore,
}

/// Denominator of each person's tax/tip proportion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxTipBasis {
    /// Sum of every item price, assigned or not
    #[default]
    Subtotal,
    /// Sum of the prices of assigned items only
    Assigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitPolicy {
    pub zero_subtotal: ZeroSubtotalPolicy,
    pub unknown_assignee: UnknownAssigneePolicy,
    pub tax_tip_basis: TaxTipBasis,
    pub tolerance: f64,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            zero_subtotal: ZeroSubtotalPolicy::default(),
            unknown_assignee: UnknownAssigneePolicy::default(),
            tax_tip_basis: TaxTipBasis::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SplitPolicy {
    /// Parse and validate a policy document
    pub fn from_json(raw: &str) -> SplitResult<Self> {
        let policy: SplitPolicy =
            serde_json::from_str(raw).map_err(|e| SplitError::InvalidConfig(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> SplitResult<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SplitError::InvalidConfig(format!(
                "tolerance must be a non-negative finite number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
