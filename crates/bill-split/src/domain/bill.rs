//! Bill Aggregate
//!
//! Line items, the people sharing them, and the flat tax and tip.

use serde::{Deserialize, Serialize};

use super::entity::{next_id, EntityKind};
use super::error::{SplitError, SplitResult};
use super::item::BillItem;
use super::person::Person;

/// A bill being split
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Line items; order does not affect the split
    #[serde(default)]
    pub items: Vec<BillItem>,
    /// People at the table, unique ids
    #[serde(default)]
    pub people: Vec<Person>,
    /// Flat surcharge on the whole bill
    #[serde(default)]
    pub tax: f64,
    /// Flat gratuity on the whole bill
    #[serde(default)]
    pub tip: f64,
    /// Display total as of the last recompute. Never an input.
    #[serde(default)]
    total: f64,
}

impl Bill {
    pub fn new(items: Vec<BillItem>, people: Vec<Person>, tax: f64, tip: f64) -> Self {
        let mut bill = Self {
            items,
            people,
            tax,
            tip,
            total: 0.0,
        };
        bill.total = bill.grand_total();
        bill
    }

    /// Sum of all item prices, assigned or not
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|item| item.price).sum()
    }

    /// subtotal + tax + tip, computed from the current fields
    pub fn grand_total(&self) -> f64 {
        self.subtotal() + self.tax + self.tip
    }

    /// Stored display total
    pub fn total(&self) -> f64 {
        self.total
    }

    pub(crate) fn set_total(&mut self, total: f64) {
        self.total = total;
    }

    pub fn item(&self, item_id: &str) -> Option<&BillItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn person(&self, person_id: &str) -> Option<&Person> {
        self.people.iter().find(|person| person.id == person_id)
    }

    pub fn has_person(&self, person_id: &str) -> bool {
        self.person(person_id).is_some()
    }

    /// Find an item or fail with `UnknownReference`
    pub fn find_item(&self, item_id: &str) -> SplitResult<&BillItem> {
        self.item(item_id)
            .ok_or_else(|| SplitError::unknown(EntityKind::Item, item_id))
    }

    pub fn find_item_mut(&mut self, item_id: &str) -> SplitResult<&mut BillItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| SplitError::unknown(EntityKind::Item, item_id))
    }

    /// Find a person or fail with `UnknownReference`
    pub fn find_person(&self, person_id: &str) -> SplitResult<&Person> {
        self.person(person_id)
            .ok_or_else(|| SplitError::unknown(EntityKind::Person, person_id))
    }

    /// Items nobody has been assigned to
    pub fn unassigned_items(&self) -> impl Iterator<Item = &BillItem> {
        self.items.iter().filter(|item| item.is_unassigned())
    }

    pub fn next_item_id(&self) -> String {
        next_id(&self.items)
    }

    pub fn next_person_id(&self) -> String {
        next_id(&self.people)
    }
}
