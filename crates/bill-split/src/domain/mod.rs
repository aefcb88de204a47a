//! Domain Layer
//!
//! Contains the bill entities and the error type shared by every operation.
//! This layer has NO external dependencies (except serde and thiserror).

mod bill;
mod entity;
mod error;
mod item;
mod person;

pub use bill::Bill;
pub use entity::{next_id, Entity, EntityKind};
pub use error::{SplitError, SplitResult};
pub use item::BillItem;
pub use person::Person;
