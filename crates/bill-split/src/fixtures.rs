//! Demo data
//!
//! Seed bill used by the front end on first load and by tests.

use crate::domain::{Bill, BillItem, Person};

/// Four dishes, three diners, 12.50 tax and 18.00 tip.
/// Two dishes are personal, two are shared by the whole table.
pub fn demo_bill() -> Bill {
    Bill::new(
        vec![
            BillItem::new("item-1", "Truffle Risotto", 28.99).with_assignees(["person-1"]),
            BillItem::new("item-2", "Margherita Pizza", 22.99).with_assignees(["person-2"]),
            BillItem::new("item-3", "Fried Calamari", 16.99)
                .with_assignees(["person-1", "person-2", "person-3"]),
            BillItem::new("item-4", "Bottle of Chianti", 45.99)
                .with_assignees(["person-1", "person-2", "person-3"]),
        ],
        vec![
            Person::new("person-1", "Alex"),
            Person::new("person-2", "Sam"),
            Person::new("person-3", "Jordan"),
        ],
        12.50,
        18.00,
    )
}
