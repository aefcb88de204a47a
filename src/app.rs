//! Bill Split Frontend App
//!
//! Three-column layout: people, items, summary.

use bill_split::fixtures::demo_bill;
use bill_split::{BillSession, SplitPolicy};
use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};
use reactive_stores::Store;

use crate::components::{
    BillItemList, ErrorBanner, NewItemForm, PeopleColumn, SummaryPanel, TaxTipForm,
};
use crate::context::SplitContext;
use crate::store::{store_toggle_assignment, with_session, SplitState};

const POLICY_JSON: &str = include_str!("../config/split-policy.json");

/// Policy from the bundled config, falling back to defaults if it is rejected
fn load_policy() -> SplitPolicy {
    match SplitPolicy::from_json(POLICY_JSON) {
        Ok(policy) => policy,
        Err(err) => {
            web_sys::console::log_1(&format!("[APP] Bad split policy, using defaults: {}", err).into());
            SplitPolicy::default()
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let session = BillSession::new(demo_bill(), load_policy()).unwrap_or_else(|err| {
        web_sys::console::log_1(&format!("[APP] Demo bill rejected, starting empty: {}", err).into());
        BillSession::default()
    });
    web_sys::console::log_1(
        &format!(
            "[APP] Loaded {} items, {} people",
            session.bill().items.len(),
            session.bill().people.len()
        )
        .into(),
    );

    let store = Store::new(SplitState::new(session));
    provide_context(store);

    let dnd = create_dnd_signals();
    provide_context(SplitContext::new(signal(None::<String>), dnd));

    // Dropping a person chip on an item row toggles that person
    bind_global_mouseup(dnd, move |person_id, item_id| {
        web_sys::console::log_1(&format!("[DND] Drop {} on {}", person_id, item_id).into());
        store_toggle_assignment(&store, &item_id, &person_id);
    });

    let counts = move || {
        with_session(&store, |s| {
            format!("{} items · {} people", s.bill().items.len(), s.bill().people.len())
        })
    };

    view! {
        <div class="app-layout">
            // Left: people
            <PeopleColumn />

            // Center: items
            <main class="main-content">
                <header class="bill-header">
                    <h1>"Split the bill"</h1>
                    <span class="bill-counts">{counts}</span>
                </header>
                <ErrorBanner />
                <NewItemForm />
                <BillItemList />
                <TaxTipForm />
            </main>

            // Right: summary
            <SummaryPanel />
        </div>
    }
}
