//! Global Bill Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity over the
//! bill session. Every change goes through the session, so totals
//! are recomputed before any view reads them.

use bill_split::{BillSession, SplitResult};
use leptos::prelude::*;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct SplitState {
    /// Bill being split
    pub session: BillSession,
    /// Message of the last rejected change, cleared by the next accepted one
    pub last_error: Option<String>,
}

impl SplitState {
    pub fn new(session: BillSession) -> Self {
        Self {
            session,
            last_error: None,
        }
    }
}

/// Type alias for the store
pub type SplitStore = Store<SplitState>;

/// Get the store from context
pub fn use_split_store() -> SplitStore {
    expect_context::<SplitStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Read from the session (tracked)
pub fn with_session<R>(store: &SplitStore, f: impl FnOnce(&BillSession) -> R) -> R {
    let session = store.session().read();
    f(&*session)
}

pub fn last_error(store: &SplitStore) -> Option<String> {
    store.last_error().get()
}

pub fn clear_error(store: &SplitStore) {
    *store.last_error().write() = None;
}

/// Apply a session change. A rejected change is logged and shown in the
/// error banner; the session itself is left as it was.
pub fn store_apply<T>(
    store: &SplitStore,
    action: &str,
    change: impl FnOnce(&mut BillSession) -> SplitResult<T>,
) -> Option<T> {
    let result = {
        let session_field = store.session();
        let mut session = session_field.write();
        change(&mut *session)
    };
    match result {
        Ok(value) => {
            if store.last_error().read_untracked().is_some() {
                clear_error(store);
            }
            Some(value)
        }
        Err(err) => {
            web_sys::console::log_1(&format!("[STORE] {} rejected: {}", action, err).into());
            *store.last_error().write() = Some(err.to_string());
            None
        }
    }
}

pub fn store_toggle_assignment(store: &SplitStore, item_id: &str, person_id: &str) {
    store_apply(store, "toggle_assignment", |s| s.toggle_assignment(item_id, person_id));
}

pub fn store_set_tax(store: &SplitStore, tax: f64) {
    store_apply(store, "set_tax", |s| s.set_tax(tax));
}

pub fn store_set_tip(store: &SplitStore, tip: f64) {
    store_apply(store, "set_tip", |s| s.set_tip(tip));
}

/// Add an item; returns its id if accepted
pub fn store_add_item(
    store: &SplitStore,
    name: &str,
    price: f64,
    assignees: Vec<String>,
) -> Option<String> {
    store_apply(store, "add_item", |s| s.add_item(name, price, assignees))
}

pub fn store_remove_item(store: &SplitStore, item_id: &str) {
    store_apply(store, "remove_item", |s| s.remove_item(item_id));
}

pub fn store_set_item_price(store: &SplitStore, item_id: &str, price: f64) {
    store_apply(store, "set_item_price", |s| s.set_item_price(item_id, price));
}

/// Add a person; returns their id if accepted
pub fn store_add_person(store: &SplitStore, name: &str) -> Option<String> {
    store_apply(store, "add_person", |s| s.add_person(name))
}

pub fn store_remove_person(store: &SplitStore, person_id: &str) {
    store_apply(store, "remove_person", |s| s.remove_person(person_id));
}

pub fn store_assign_everyone(store: &SplitStore, item_id: &str) {
    store_apply(store, "assign_everyone", |s| s.assign_everyone(item_id));
}

pub fn store_clear_assignees(store: &SplitStore, item_id: &str) {
    store_apply(store, "clear_assignees", |s| s.clear_assignees(item_id));
}
