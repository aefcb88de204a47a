//! Bill Split Calculator
//!
//! Pure allocation of a bill between the people at the table:
//! - each item's price is split evenly between its assignees
//! - tax + tip is distributed in proportion to each person's item share
//!
//! Nothing here mutates its input; every operation returns a new value.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::{Bill, EntityKind, SplitError, SplitResult};
use crate::policy::{SplitPolicy, TaxTipBasis, ZeroSubtotalPolicy};
use crate::validate::validate_bill;

/// One person's part of the bill
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonShare {
    pub person_id: String,
    /// Sum of price / assignee count over the items this person shares
    pub item_share: f64,
    /// Fraction of tax + tip this person carries
    pub proportion: f64,
    pub tax_tip_share: f64,
    pub total: f64,
}

/// Full breakdown of a split, in people order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub shares: Vec<PersonShare>,
    pub subtotal: f64,
    /// Sum of prices of items with at least one assignee
    pub assigned_subtotal: f64,
    /// Sum of prices of items nobody shares
    pub unassigned: f64,
    pub tax: f64,
    pub tip: f64,
}

impl Allocation {
    /// subtotal + tax + tip
    pub fn grand_total(&self) -> f64 {
        self.subtotal + self.tax + self.tip
    }

    /// What the people at the table pay in total
    pub fn allocated(&self) -> f64 {
        self.shares.iter().map(|share| share.total).sum()
    }

    /// grand_total - allocated: money nobody is paying for
    pub fn shortfall(&self) -> f64 {
        self.grand_total() - self.allocated()
    }

    pub fn share(&self, person_id: &str) -> Option<&PersonShare> {
        self.shares.iter().find(|share| share.person_id == person_id)
    }

    /// Whether everything on the bill is paid for, within `tolerance`
    pub fn is_conserved(&self, tolerance: f64) -> bool {
        self.shortfall().abs() <= tolerance
    }
}

/// Compute every person's share of the bill.
///
/// Unassigned items count towards the subtotal but towards nobody's share.
/// When the tax/tip basis is zero the proportional split is undefined and
/// `policy.zero_subtotal` decides what happens to tax and tip.
pub fn allocate(bill: &Bill, policy: &SplitPolicy) -> SplitResult<Allocation> {
    validate_bill(bill, policy)?;

    let index: HashMap<&str, usize> = bill
        .people
        .iter()
        .enumerate()
        .map(|(i, person)| (person.id.as_str(), i))
        .collect();

    let mut item_shares = vec![0.0_f64; bill.people.len()];
    let mut subtotal = 0.0;
    let mut assigned_subtotal = 0.0;
    let mut unassigned = 0.0;

    for item in &bill.items {
        subtotal += item.price;
        // Unknown ids only survive validation under the Ignore policy
        let sharers: Vec<usize> = item
            .assigned_to
            .iter()
            .filter_map(|id| index.get(id.as_str()).copied())
            .collect();
        if sharers.is_empty() {
            unassigned += item.price;
            continue;
        }
        assigned_subtotal += item.price;
        let each = item.price / sharers.len() as f64;
        for i in sharers {
            item_shares[i] += each;
        }
    }

    let basis = match policy.tax_tip_basis {
        TaxTipBasis::Subtotal => subtotal,
        TaxTipBasis::Assigned => assigned_subtotal,
    };
    let extras = bill.tax + bill.tip;
    let headcount = bill.people.len() as f64;

    let shares = bill
        .people
        .iter()
        .zip(item_shares)
        .map(|(person, item_share)| {
            let proportion = if basis > 0.0 {
                item_share / basis
            } else {
                match policy.zero_subtotal {
                    ZeroSubtotalPolicy::EvenSplit => 1.0 / headcount,
                    ZeroSubtotalPolicy::Unallocated => 0.0,
                }
            };
            let tax_tip_share = extras * proportion;
            PersonShare {
                person_id: person.id.clone(),
                item_share,
                proportion,
                tax_tip_share,
                total: item_share + tax_tip_share,
            }
        })
        .collect();

    tracing::trace!(
        people = bill.people.len(),
        items = bill.items.len(),
        subtotal,
        unassigned,
        "allocated bill"
    );

    Ok(Allocation {
        shares,
        subtotal,
        assigned_subtotal,
        unassigned,
        tax: bill.tax,
        tip: bill.tip,
    })
}

/// Write an allocation's totals back onto the bill it was computed from
pub(crate) fn apply_allocation(bill: &mut Bill, allocation: &Allocation) {
    for (person, share) in bill.people.iter_mut().zip(&allocation.shares) {
        person.set_total(share.total);
    }
    bill.set_total(allocation.grand_total());
}

/// Return the bill with every person's total recomputed.
///
/// Items, tax and tip are carried over unchanged.
pub fn recompute_totals(bill: &Bill, policy: &SplitPolicy) -> SplitResult<Bill> {
    let allocation = allocate(bill, policy)?;
    let mut updated = bill.clone();
    apply_allocation(&mut updated, &allocation);
    Ok(updated)
}

/// Flip a person's membership on an item in place.
/// Returns true if the person is now assigned.
pub(crate) fn toggle_in(bill: &mut Bill, item_id: &str, person_id: &str) -> SplitResult<bool> {
    if !bill.has_person(person_id) {
        return Err(SplitError::unknown(EntityKind::Person, person_id));
    }
    Ok(bill.find_item_mut(item_id)?.toggle(person_id))
}

/// Toggle a person on an item and return the recomputed bill.
///
/// Fails without touching `bill` if either id is unknown or the bill
/// carries an invalid amount.
pub fn toggle_assignment(
    bill: &Bill,
    item_id: &str,
    person_id: &str,
    policy: &SplitPolicy,
) -> SplitResult<Bill> {
    let mut candidate = bill.clone();
    toggle_in(&mut candidate, item_id, person_id)?;
    let allocation = allocate(&candidate, policy)?;
    apply_allocation(&mut candidate, &allocation);
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillItem, Person};
    use crate::fixtures::demo_bill;
    use crate::policy::UnknownAssigneePolicy;

    const EPS: f64 = 1e-6;

    fn people(n: usize) -> Vec<Person> {
        (1..=n)
            .map(|i| Person::new(format!("person-{}", i), format!("Guest {}", i)))
            .collect()
    }

    fn total_of(bill: &Bill, person_id: &str) -> f64 {
        bill.person(person_id).map(|p| p.total()).unwrap_or(f64::NAN)
    }

    #[test]
    fn test_demo_scenario() {
        let bill = recompute_totals(&demo_bill(), &SplitPolicy::default()).unwrap();
        assert!((bill.subtotal() - 114.96).abs() < EPS);

        let p1 = total_of(&bill, "person-1");
        let p2 = total_of(&bill, "person-2");
        let p3 = total_of(&bill, "person-3");
        assert!((p1 - 63.24).abs() < 0.01, "p1 = {}", p1);
        assert!((p2 - 55.65).abs() < 0.01, "p2 = {}", p2);
        assert!((p3 - 26.56).abs() < 0.01, "p3 = {}", p3);
        assert!((p1 + p2 + p3 - 145.46).abs() < EPS);
        assert!((bill.total() - 145.46).abs() < EPS);
    }

    #[test]
    fn test_demo_breakdown() {
        let allocation = allocate(&demo_bill(), &SplitPolicy::default()).unwrap();
        let p1 = allocation.share("person-1").unwrap();
        assert!((p1.item_share - (28.99 + 16.99 / 3.0 + 45.99 / 3.0)).abs() < EPS);
        assert!((p1.proportion - p1.item_share / 114.96).abs() < EPS);
        assert!((p1.tax_tip_share - 30.5 * p1.proportion).abs() < EPS);
        assert!(allocation.is_conserved(EPS));
        assert_eq!(allocation.unassigned, 0.0);
    }

    #[test]
    fn test_recompute_leaves_inputs_alone() {
        let input = demo_bill();
        let output = recompute_totals(&input, &SplitPolicy::default()).unwrap();
        assert_eq!(output.items, input.items);
        assert_eq!(output.tax, input.tax);
        assert_eq!(output.tip, input.tip);
        assert!(input.people.iter().all(|p| p.total() == 0.0));
    }

    #[test]
    fn test_single_assignee_gets_full_price() {
        let bill = Bill::new(
            vec![BillItem::new("item-1", "Steak", 42.5).with_assignees(["person-2"])],
            people(2),
            0.0,
            0.0,
        );
        let allocation = allocate(&bill, &SplitPolicy::default()).unwrap();
        assert_eq!(allocation.share("person-2").unwrap().item_share, 42.5);
        assert_eq!(allocation.share("person-1").unwrap().item_share, 0.0);
    }

    #[test]
    fn test_even_split_between_assignees() {
        let bill = Bill::new(
            vec![BillItem::new("item-1", "Nachos", 10.0)
                .with_assignees(["person-1", "person-2", "person-3"])],
            people(3),
            0.0,
            0.0,
        );
        let allocation = allocate(&bill, &SplitPolicy::default()).unwrap();
        for share in &allocation.shares {
            assert!((share.item_share - 10.0 / 3.0).abs() < EPS);
        }
        assert!((allocation.allocated() - 10.0).abs() < EPS);
    }

    #[test]
    fn test_zero_subtotal_splits_tax_and_tip_evenly() {
        let bill = Bill::new(
            vec![BillItem::new("item-1", "Water", 0.0).with_assignees(["person-1"])],
            people(4),
            2.0,
            6.0,
        );
        let allocation = allocate(&bill, &SplitPolicy::default()).unwrap();
        for share in &allocation.shares {
            assert!((share.total - 2.0).abs() < EPS);
            assert!(share.total.is_finite());
        }
        assert!(allocation.is_conserved(EPS));
    }

    #[test]
    fn test_zero_subtotal_unallocated_policy() {
        let bill = Bill::new(vec![], people(2), 5.0, 5.0);
        let policy = SplitPolicy {
            zero_subtotal: ZeroSubtotalPolicy::Unallocated,
            ..SplitPolicy::default()
        };
        let allocation = allocate(&bill, &policy).unwrap();
        assert!(allocation.shares.iter().all(|s| s.total == 0.0));
        assert!((allocation.shortfall() - 10.0).abs() < EPS);
    }

    #[test]
    fn test_zero_subtotal_without_people() {
        let bill = Bill::new(vec![], vec![], 5.0, 5.0);
        let allocation = allocate(&bill, &SplitPolicy::default()).unwrap();
        assert!(allocation.shares.is_empty());
        assert_eq!(allocation.allocated(), 0.0);
    }

    #[test]
    fn test_unassigned_item_without_tax_or_tip() {
        let bill = Bill::new(
            vec![
                BillItem::new("item-1", "Pasta", 18.0).with_assignees(["person-1"]),
                BillItem::new("item-2", "Dessert", 7.0),
            ],
            people(2),
            0.0,
            0.0,
        );
        let allocation = allocate(&bill, &SplitPolicy::default()).unwrap();
        assert_eq!(allocation.unassigned, 7.0);
        assert!((allocation.shortfall() - 7.0).abs() < EPS);
    }

    #[test]
    fn test_unassigned_item_with_subtotal_basis_loses_its_tax_share() {
        let bill = Bill::new(
            vec![
                BillItem::new("item-1", "Pasta", 15.0).with_assignees(["person-1"]),
                BillItem::new("item-2", "Dessert", 5.0),
            ],
            people(1),
            2.0,
            2.0,
        );
        let allocation = allocate(&bill, &SplitPolicy::default()).unwrap();
        let expected_shortfall = 5.0 + 4.0 * 5.0 / 20.0;
        assert!((allocation.shortfall() - expected_shortfall).abs() < EPS);
    }

    #[test]
    fn test_unassigned_item_with_assigned_basis() {
        let bill = Bill::new(
            vec![
                BillItem::new("item-1", "Pasta", 15.0).with_assignees(["person-1"]),
                BillItem::new("item-2", "Dessert", 5.0),
            ],
            people(1),
            2.0,
            2.0,
        );
        let policy = SplitPolicy {
            tax_tip_basis: TaxTipBasis::Assigned,
            ..SplitPolicy::default()
        };
        let allocation = allocate(&bill, &policy).unwrap();
        assert!((allocation.shortfall() - 5.0).abs() < EPS);
        assert!((allocation.share("person-1").unwrap().total - 19.0).abs() < EPS);
    }

    #[test]
    fn test_assigned_basis_with_nothing_assigned_follows_zero_policy() {
        let bill = Bill::new(
            vec![
                BillItem::new("item-1", "Pasta", 15.0),
                BillItem::new("item-2", "Dessert", 5.0),
            ],
            people(2),
            3.0,
            3.0,
        );
        let policy = SplitPolicy {
            tax_tip_basis: TaxTipBasis::Assigned,
            ..SplitPolicy::default()
        };
        let allocation = allocate(&bill, &policy).unwrap();
        assert_eq!(allocation.assigned_subtotal, 0.0);
        assert!((allocation.unassigned - 20.0).abs() < EPS);
        for share in &allocation.shares {
            assert_eq!(share.item_share, 0.0);
            assert!((share.proportion - 0.5).abs() < EPS);
            assert!((share.total - 3.0).abs() < EPS);
        }

        let unallocated = SplitPolicy {
            zero_subtotal: ZeroSubtotalPolicy::Unallocated,
            ..policy
        };
        let allocation = allocate(&bill, &unallocated).unwrap();
        assert!(allocation.shares.iter().all(|share| share.total == 0.0));
        assert!((allocation.shortfall() - 26.0).abs() < EPS);
    }

    #[test]
    fn test_overflowing_prices_are_rejected_not_nan() {
        let bill = Bill::new(
            vec![
                BillItem::new("item-1", "Caviar", 1e308).with_assignees(["person-1"]),
                BillItem::new("item-2", "More caviar", 1e308).with_assignees(["person-1"]),
            ],
            people(1),
            0.0,
            0.0,
        );
        assert!(matches!(
            recompute_totals(&bill, &SplitPolicy::default()),
            Err(SplitError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_ignored_assignee_does_not_dilute_the_split() {
        let bill = Bill::new(
            vec![BillItem::new("item-1", "Pizza", 20.0).with_assignees(["person-1", "ghost"])],
            people(1),
            0.0,
            0.0,
        );
        assert!(allocate(&bill, &SplitPolicy::default()).is_err());

        let policy = SplitPolicy {
            unknown_assignee: UnknownAssigneePolicy::Ignore,
            ..SplitPolicy::default()
        };
        let allocation = allocate(&bill, &policy).unwrap();
        assert_eq!(allocation.share("person-1").unwrap().total, 20.0);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let policy = SplitPolicy::default();
        let first = recompute_totals(&demo_bill(), &policy).unwrap();
        let second = recompute_totals(&first, &policy).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_inputs_are_rejected() {
        let mut bill = demo_bill();
        bill.tip = -1.0;
        assert!(matches!(
            recompute_totals(&bill, &SplitPolicy::default()),
            Err(SplitError::InvalidAmount { .. })
        ));

        let mut bill = demo_bill();
        bill.items[0].price = -28.99;
        let before = bill.clone();
        assert!(matches!(
            toggle_assignment(&bill, "item-2", "person-3", &SplitPolicy::default()),
            Err(SplitError::InvalidAmount { .. })
        ));
        assert_eq!(bill, before);
    }

    #[test]
    fn test_toggle_assignment_recomputes() {
        let policy = SplitPolicy::default();
        let bill = recompute_totals(&demo_bill(), &policy).unwrap();
        let toggled = toggle_assignment(&bill, "item-2", "person-3", &policy).unwrap();

        assert!(toggled.item("item-2").unwrap().is_assigned_to("person-3"));
        assert!(total_of(&toggled, "person-3") > total_of(&bill, "person-3"));
        assert!(total_of(&toggled, "person-2") < total_of(&bill, "person-2"));

        let restored = toggle_assignment(&toggled, "item-2", "person-3", &policy).unwrap();
        assert_eq!(restored, bill);
    }

    #[test]
    fn test_toggle_unknown_references() {
        let policy = SplitPolicy::default();
        let bill = demo_bill();
        assert_eq!(
            toggle_assignment(&bill, "item-99", "person-1", &policy),
            Err(SplitError::unknown(EntityKind::Item, "item-99"))
        );
        assert_eq!(
            toggle_assignment(&bill, "item-1", "person-99", &policy),
            Err(SplitError::unknown(EntityKind::Person, "person-99"))
        );
    }
}
