//! Bill Item Entity
//!
//! A line item on the bill, shared evenly by the people assigned to it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::entity::{Entity, EntityKind};

/// A line item on the bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    /// Unique identifier
    pub id: String,
    /// Display label, not used in computation
    pub name: String,
    /// Total cost of the item (not per person)
    pub price: f64,
    /// People sharing this item. Empty = unassigned.
    #[serde(default)]
    pub assigned_to: BTreeSet<String>,
}

impl BillItem {
    /// Create an unassigned item
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            assigned_to: BTreeSet::new(),
        }
    }

    /// Builder-style assignment, replacing any existing assignees
    pub fn with_assignees<I, S>(mut self, person_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assigned_to = person_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_assigned_to(&self, person_id: &str) -> bool {
        self.assigned_to.contains(person_id)
    }

    /// Check if nobody shares this item
    pub fn is_unassigned(&self) -> bool {
        self.assigned_to.is_empty()
    }

    /// Flip a person's membership. Returns true if the person is now assigned.
    pub fn toggle(&mut self, person_id: &str) -> bool {
        if self.assigned_to.remove(person_id) {
            false
        } else {
            self.assigned_to.insert(person_id.to_string());
            true
        }
    }
}

impl Entity for BillItem {
    const KIND: EntityKind = EntityKind::Item;

    fn id(&self) -> &str {
        &self.id
    }
}
