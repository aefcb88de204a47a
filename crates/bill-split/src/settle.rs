//! Cent Settlement
//!
//! Turns fractional totals into whole cents with the largest-remainder
//! method, so the cents always add up to the rounded amount owed.

use serde::Serialize;
use std::cmp::Ordering;

use crate::calculator::Allocation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CentShare {
    pub person_id: String,
    pub cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// One entry per person, in people order
    pub shares: Vec<CentShare>,
    /// Σ shares, equal to the allocated amount rounded to the cent
    pub total_cents: i64,
}

impl Settlement {
    pub fn cents_for(&self, person_id: &str) -> Option<i64> {
        self.shares
            .iter()
            .find(|share| share.person_id == person_id)
            .map(|share| share.cents)
    }
}

pub(crate) fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Settle an allocation in whole cents.
///
/// Everyone pays the floor of their total; the cents left over go one each
/// to the largest fractional remainders, earlier people winning ties.
pub fn settle_in_cents(allocation: &Allocation) -> Settlement {
    let total_cents = to_cents(allocation.allocated());

    let mut floors = Vec::with_capacity(allocation.shares.len());
    let mut remainders = Vec::with_capacity(allocation.shares.len());
    for (i, share) in allocation.shares.iter().enumerate() {
        let exact = share.total * 100.0;
        let floor = exact.floor();
        floors.push(floor as i64);
        remainders.push((i, exact - floor));
    }

    remainders.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    // Validated bills stay far below i64 cents; saturate rather than panic otherwise
    let floored = floors.iter().fold(0i64, |acc, &c| acc.saturating_add(c));
    let leftover = total_cents.saturating_sub(floored);
    for &(i, _) in remainders.iter().cycle().take(leftover.max(0) as usize) {
        floors[i] = floors[i].saturating_add(1);
    }

    let shares = allocation
        .shares
        .iter()
        .zip(floors)
        .map(|(share, cents)| CentShare {
            person_id: share.person_id.clone(),
            cents,
        })
        .collect();

    Settlement { shares, total_cents }
}

/// Format cents as a decimal amount, e.g. 6325 -> "63.25"
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
