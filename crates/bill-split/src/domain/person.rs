//! Person Entity

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};

/// Someone at the table.
///
/// `total` is derived: only the calculator writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique identifier, referenced by `BillItem::assigned_to`
    pub id: String,
    /// Display label
    pub name: String,
    #[serde(default)]
    total: f64,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total: 0.0,
        }
    }

    /// Amount this person owes as of the last recompute
    pub fn total(&self) -> f64 {
        self.total
    }

    pub(crate) fn set_total(&mut self, total: f64) {
        self.total = total;
    }
}

impl Entity for Person {
    const KIND: EntityKind = EntityKind::Person;

    fn id(&self) -> &str {
        &self.id
    }
}
