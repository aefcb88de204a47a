//! Boundary validation
//!
//! Invalid input is rejected here, never clamped.

use std::collections::HashSet;

use crate::domain::{Bill, EntityKind, SplitError, SplitResult};
use crate::policy::{SplitPolicy, UnknownAssigneePolicy};

/// Largest accepted amount: a single price, tax, tip, or the sums of them.
/// Keeps every total well inside `f64` precision and `i64` cents.
pub const MAX_AMOUNT: f64 = 1e12;

/// Check that an amount is finite, non-negative and at most `MAX_AMOUNT`
pub fn validate_amount(field: &str, value: f64) -> SplitResult<f64> {
    if value.is_finite() && (0.0..=MAX_AMOUNT).contains(&value) {
        Ok(value)
    } else {
        Err(SplitError::InvalidAmount {
            field: field.to_string(),
            value,
        })
    }
}

/// Check that a display name has visible content. Returns it trimmed.
pub fn validate_name(kind: EntityKind, name: &str) -> SplitResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(SplitError::EmptyName { kind })
    } else {
        Ok(trimmed.to_string())
    }
}

/// Validate a whole bill: amounts and their sums, names, id uniqueness and
/// assignee references.
pub fn validate_bill(bill: &Bill, policy: &SplitPolicy) -> SplitResult<()> {
    validate_amount("tax", bill.tax)?;
    validate_amount("tip", bill.tip)?;
    validate_amount("tax + tip", bill.tax + bill.tip)?;

    let mut person_ids = HashSet::with_capacity(bill.people.len());
    for person in &bill.people {
        if !person_ids.insert(person.id.as_str()) {
            return Err(SplitError::DuplicateId {
                kind: EntityKind::Person,
                id: person.id.clone(),
            });
        }
        validate_name(EntityKind::Person, &person.name)?;
    }

    let mut item_ids = HashSet::with_capacity(bill.items.len());
    for item in &bill.items {
        if !item_ids.insert(item.id.as_str()) {
            return Err(SplitError::DuplicateId {
                kind: EntityKind::Item,
                id: item.id.clone(),
            });
        }
        validate_amount(&format!("price of {}", item.id), item.price)?;
        validate_name(EntityKind::Item, &item.name)?;

        if policy.unknown_assignee == UnknownAssigneePolicy::Reject {
            if let Some(unknown) = item
                .assigned_to
                .iter()
                .find(|id| !person_ids.contains(id.as_str()))
            {
                return Err(SplitError::unknown(EntityKind::Person, unknown));
            }
        }
    }

    validate_amount("subtotal", bill.subtotal())?;
    Ok(())
}
