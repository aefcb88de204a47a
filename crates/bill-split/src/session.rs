//! Bill Session
//!
//! Recompute-on-change wrapper around a bill. Every mutator validates and
//! recomputes a candidate copy and only commits it on success, so readers
//! never see stale totals or a half-applied change.

use tracing::{debug, warn};

use crate::calculator::{allocate, apply_allocation, toggle_in, Allocation};
use crate::domain::{Bill, BillItem, EntityKind, Person, SplitError, SplitResult};
use crate::policy::SplitPolicy;
use crate::settle::{settle_in_cents, Settlement};
use crate::validate::{validate_amount, validate_name};

#[derive(Debug, Clone, PartialEq)]
pub struct BillSession {
    bill: Bill,
    policy: SplitPolicy,
    allocation: Allocation,
    /// Bumped on every committed change
    version: u64,
}

/// Empty bill under the default policy
impl Default for BillSession {
    fn default() -> Self {
        Self {
            bill: Bill::default(),
            policy: SplitPolicy::default(),
            allocation: Allocation::default(),
            version: 0,
        }
    }
}

impl BillSession {
    /// Start a session from a seeded bill. Totals are computed immediately.
    pub fn new(bill: Bill, policy: SplitPolicy) -> SplitResult<Self> {
        policy.validate()?;
        let mut bill = bill;
        let allocation = allocate(&bill, &policy)?;
        apply_allocation(&mut bill, &allocation);
        Ok(Self {
            bill,
            policy,
            allocation,
            version: 0,
        })
    }

    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    pub fn policy(&self) -> &SplitPolicy {
        &self.policy
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Breakdown of the committed bill
    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Whole-cent amounts for the committed bill
    pub fn settlement(&self) -> Settlement {
        settle_in_cents(&self.allocation)
    }

    pub fn into_bill(self) -> Bill {
        self.bill
    }

    /// Run `mutate` against a copy of the bill, recompute, and commit on success.
    fn apply<T, F>(&mut self, action: &str, mutate: F) -> SplitResult<T>
    where
        F: FnOnce(&mut Bill) -> SplitResult<T>,
    {
        let mut candidate = self.bill.clone();
        let outcome = mutate(&mut candidate).and_then(|value| {
            let allocation = allocate(&candidate, &self.policy)?;
            Ok((value, allocation))
        });

        match outcome {
            Ok((value, allocation)) => {
                apply_allocation(&mut candidate, &allocation);
                self.bill = candidate;
                self.allocation = allocation;
                self.version += 1;
                debug!(
                    action,
                    version = self.version,
                    total = self.bill.total(),
                    "bill recomputed"
                );
                Ok(value)
            }
            Err(err) => {
                warn!(action, error = %err, "bill change rejected");
                Err(err)
            }
        }
    }

    /// Flip a person on an item. Returns true if the person is now assigned.
    pub fn toggle_assignment(&mut self, item_id: &str, person_id: &str) -> SplitResult<bool> {
        self.apply("toggle_assignment", |bill| toggle_in(bill, item_id, person_id))
    }

    pub fn set_tax(&mut self, tax: f64) -> SplitResult<()> {
        self.apply("set_tax", |bill| {
            bill.tax = validate_amount("tax", tax)?;
            Ok(())
        })
    }

    pub fn set_tip(&mut self, tip: f64) -> SplitResult<()> {
        self.apply("set_tip", |bill| {
            bill.tip = validate_amount("tip", tip)?;
            Ok(())
        })
    }

    /// Add an item and return its generated id
    pub fn add_item<I, S>(&mut self, name: &str, price: f64, assignees: I) -> SplitResult<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.apply("add_item", |bill| {
            let name = validate_name(EntityKind::Item, name)?;
            let price = validate_amount("price", price)?;
            let id = bill.next_item_id();
            bill.items
                .push(BillItem::new(id.clone(), name, price).with_assignees(assignees));
            Ok(id)
        })
    }

    pub fn remove_item(&mut self, item_id: &str) -> SplitResult<BillItem> {
        self.apply("remove_item", |bill| {
            let index = bill
                .items
                .iter()
                .position(|item| item.id == item_id)
                .ok_or_else(|| SplitError::unknown(EntityKind::Item, item_id))?;
            Ok(bill.items.remove(index))
        })
    }

    pub fn set_item_price(&mut self, item_id: &str, price: f64) -> SplitResult<()> {
        self.apply("set_item_price", |bill| {
            let price = validate_amount("price", price)?;
            bill.find_item_mut(item_id)?.price = price;
            Ok(())
        })
    }

    /// Add a person and return their generated id
    pub fn add_person(&mut self, name: &str) -> SplitResult<String> {
        self.apply("add_person", |bill| {
            let name = validate_name(EntityKind::Person, name)?;
            let id = bill.next_person_id();
            bill.people.push(Person::new(id.clone(), name));
            Ok(id)
        })
    }

    /// Remove a person and drop them from every item they shared
    pub fn remove_person(&mut self, person_id: &str) -> SplitResult<Person> {
        self.apply("remove_person", |bill| {
            let index = bill
                .people
                .iter()
                .position(|person| person.id == person_id)
                .ok_or_else(|| SplitError::unknown(EntityKind::Person, person_id))?;
            for item in &mut bill.items {
                item.assigned_to.remove(person_id);
            }
            Ok(bill.people.remove(index))
        })
    }

    /// Share an item between everyone at the table
    pub fn assign_everyone(&mut self, item_id: &str) -> SplitResult<()> {
        self.apply("assign_everyone", |bill| {
            let everyone: Vec<String> = bill.people.iter().map(|p| p.id.clone()).collect();
            bill.find_item_mut(item_id)?.assigned_to.extend(everyone);
            Ok(())
        })
    }

    pub fn clear_assignees(&mut self, item_id: &str) -> SplitResult<()> {
        self.apply("clear_assignees", |bill| {
            bill.find_item_mut(item_id)?.assigned_to.clear();
            Ok(())
        })
    }

    /// Swap the policy; the bill must be valid under the new one
    pub fn set_policy(&mut self, policy: SplitPolicy) -> SplitResult<()> {
        policy.validate()?;
        let allocation = match allocate(&self.bill, &policy) {
            Ok(allocation) => allocation,
            Err(err) => {
                warn!(action = "set_policy", error = %err, "bill change rejected");
                return Err(err);
            }
        };
        apply_allocation(&mut self.bill, &allocation);
        self.policy = policy;
        self.allocation = allocation;
        self.version += 1;
        debug!(action = "set_policy", version = self.version, "bill recomputed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::demo_bill;
    use crate::policy::{UnknownAssigneePolicy, ZeroSubtotalPolicy};

    const EPS: f64 = 1e-6;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    }

    fn session() -> BillSession {
        init_tracing();
        BillSession::new(demo_bill(), SplitPolicy::default()).unwrap()
    }

    fn conserved(session: &BillSession) -> bool {
        let sum: f64 = session.bill().people.iter().map(|p| p.total()).sum();
        (sum - session.bill().grand_total()).abs() < EPS
    }

    #[test]
    fn test_new_session_has_fresh_totals() {
        let session = session();
        assert_eq!(session.version(), 0);
        assert!(session.bill().people.iter().all(|p| p.total() > 0.0));
        assert!(conserved(&session));
    }

    #[test]
    fn test_new_session_rejects_invalid_seed() {
        let mut bill = demo_bill();
        bill.tax = -12.5;
        assert!(matches!(
            BillSession::new(bill, SplitPolicy::default()),
            Err(SplitError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_toggle_commits_and_bumps_version() {
        let mut session = session();
        let before = session.bill().person("person-3").unwrap().total();

        assert!(session.toggle_assignment("item-1", "person-3").unwrap());
        assert_eq!(session.version(), 1);
        assert!(session.bill().person("person-3").unwrap().total() > before);
        assert!(conserved(&session));

        assert!(!session.toggle_assignment("item-1", "person-3").unwrap());
        assert_eq!(session.version(), 2);
        assert!((session.bill().person("person-3").unwrap().total() - before).abs() < EPS);
    }

    #[test]
    fn test_failed_change_leaves_session_untouched() {
        let mut session = session();
        let snapshot = session.clone();

        assert!(session.toggle_assignment("item-1", "nobody").is_err());
        assert!(session.set_tax(-1.0).is_err());
        assert!(session.set_tip(f64::NAN).is_err());
        assert!(session.set_item_price("item-2", -5.0).is_err());
        assert!(session.remove_item("item-42").is_err());
        assert!(session.add_item("  ", 3.0, Vec::<String>::new()).is_err());
        assert!(session.add_item("Fries", 3.0, ["ghost"]).is_err());

        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_tax_and_tip_setters_recompute() {
        let mut session = session();
        session.set_tax(0.0).unwrap();
        session.set_tip(0.0).unwrap();
        assert!((session.bill().total() - 114.96).abs() < EPS);
        assert!(conserved(&session));
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn test_add_and_remove_items() {
        let mut session = session();
        let id = session.add_item("Tiramisu", 9.5, ["person-3"]).unwrap();
        assert_eq!(id, "item-5");
        assert_eq!(session.bill().item(&id).unwrap().name, "Tiramisu");
        assert!(conserved(&session));

        let removed = session.remove_item(&id).unwrap();
        assert_eq!(removed.price, 9.5);
        assert!(session.bill().item(&id).is_none());
    }

    #[test]
    fn test_unassigned_item_shows_up_in_allocation() {
        let mut session = session();
        session.add_item("Espresso", 4.0, Vec::<String>::new()).unwrap();
        assert_eq!(session.allocation().unassigned, 4.0);
        assert!(!session.allocation().is_conserved(EPS));
    }

    #[test]
    fn test_remove_person_drops_their_assignments() {
        let mut session = session();
        let removed = session.remove_person("person-1").unwrap();
        assert_eq!(removed.name, "Alex");
        assert!(session
            .bill()
            .items
            .iter()
            .all(|item| !item.is_assigned_to("person-1")));
        // The risotto was Alex's alone and is now unassigned
        assert!(session.bill().item("item-1").unwrap().is_unassigned());
        assert!((session.allocation().unassigned - 28.99).abs() < EPS);
    }

    #[test]
    fn test_add_person_then_share_everything() {
        let mut session = session();
        let id = session.add_person(" Riley ").unwrap();
        assert_eq!(id, "person-4");
        assert_eq!(session.bill().person(&id).unwrap().name, "Riley");
        assert_eq!(session.bill().person(&id).unwrap().total(), 0.0);

        session.assign_everyone("item-4").unwrap();
        assert_eq!(session.bill().item("item-4").unwrap().assigned_to.len(), 4);
        assert!(session.bill().person(&id).unwrap().total() > 0.0);
        assert!(conserved(&session));
    }

    #[test]
    fn test_clear_assignees() {
        let mut session = session();
        session.clear_assignees("item-3").unwrap();
        assert!(session.bill().item("item-3").unwrap().is_unassigned());
        assert!((session.allocation().unassigned - 16.99).abs() < EPS);
    }

    #[test]
    fn test_set_policy() {
        let mut session = session();
        session.set_tax(0.0).unwrap();
        for item in ["item-1", "item-2", "item-3", "item-4"] {
            session.set_item_price(item, 0.0).unwrap();
        }
        // Only the tip is left, split evenly by default
        for person in &session.bill().people {
            assert!((person.total() - 6.0).abs() < EPS);
        }

        session
            .set_policy(SplitPolicy {
                zero_subtotal: ZeroSubtotalPolicy::Unallocated,
                ..SplitPolicy::default()
            })
            .unwrap();
        assert!(session.bill().people.iter().all(|p| p.total() == 0.0));

        let bad = SplitPolicy {
            tolerance: -1.0,
            ..SplitPolicy::default()
        };
        assert!(session.set_policy(bad).is_err());
    }

    #[test]
    fn test_set_policy_rejected_when_bill_breaks_it() {
        let lenient = SplitPolicy {
            unknown_assignee: UnknownAssigneePolicy::Ignore,
            ..SplitPolicy::default()
        };
        let mut bill = demo_bill();
        bill.items[0].assigned_to.insert("ghost".to_string());
        let mut session = BillSession::new(bill, lenient).unwrap();
        let version = session.version();

        assert!(session.set_policy(SplitPolicy::default()).is_err());
        assert_eq!(session.policy(), &lenient);
        assert_eq!(session.version(), version);
    }

    #[test]
    fn test_settlement_matches_rounded_total() {
        let session = session();
        let settlement = session.settlement();
        assert_eq!(settlement.total_cents, 14546);
        assert_eq!(settlement.shares.len(), 3);
    }

    #[test]
    fn test_default_session_matches_empty_bill() {
        let empty = BillSession::new(Bill::default(), SplitPolicy::default()).unwrap();
        assert_eq!(BillSession::default(), empty);
        assert_eq!(BillSession::default().settlement().total_cents, 0);
    }

    #[test]
    fn test_oversized_price_is_rejected_and_settlement_still_works() {
        let mut session = session();
        let before = session.clone();
        assert!(matches!(
            session.add_item("Gold leaf", 1e17, ["person-1"]),
            Err(SplitError::InvalidAmount { .. })
        ));
        assert!(matches!(
            session.set_item_price("item-1", 1e17),
            Err(SplitError::InvalidAmount { .. })
        ));
        assert_eq!(session, before);
        assert_eq!(session.settlement().total_cents, 14546);
    }
}
