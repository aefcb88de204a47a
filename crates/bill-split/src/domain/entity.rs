//! Domain Layer - Core Entity Trait
//!
//! Every bill entity is addressed by a stable string id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Core trait for all bill entities
pub trait Entity {
    /// Which kind of entity this is, used in error messages and id prefixes
    const KIND: EntityKind;

    /// Returns the entity's unique identifier
    fn id(&self) -> &str;
}

/// Kinds of entity a bill references by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Person,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Item => "item",
            EntityKind::Person => "person",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate the next id by scanning existing entities.
/// Ids follow the pattern "{kind}-{N}" with N one above the highest in use;
/// ids that don't follow the pattern are ignored.
pub fn next_id<'a, T, I>(entities: I) -> String
where
    T: Entity + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let prefix = format!("{}-", T::KIND.as_str());
    let max = entities
        .into_iter()
        .filter_map(|e| e.id().strip_prefix(&prefix).and_then(|n| n.parse::<u64>().ok()))
        .max()
        .unwrap_or(0);
    format!("{}{}", prefix, max.saturating_add(1))
}
