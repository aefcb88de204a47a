//! Bill Split Engine
//!
//! Splits a restaurant bill between the people at the table.
//!
//! Layered architecture:
//! - domain: bill entities (items, people, the bill itself) and errors
//! - validate: boundary checks for amounts, names and references
//! - calculator: pure allocation of item prices, tax and tip
//! - session: recompute-on-change wrapper the UI mutates through
//! - settle: whole-cent settlement of fractional totals
//! - policy: configurable handling of undefined cases

pub mod calculator;
pub mod domain;
pub mod fixtures;
pub mod policy;
pub mod session;
pub mod settle;
pub mod validate;

pub use calculator::{allocate, recompute_totals, toggle_assignment, Allocation, PersonShare};
pub use domain::{Bill, BillItem, Entity, EntityKind, Person, SplitError, SplitResult};
pub use policy::{SplitPolicy, TaxTipBasis, UnknownAssigneePolicy, ZeroSubtotalPolicy};
pub use session::BillSession;
pub use settle::{settle_in_cents, CentShare, Settlement};
