//! New Item Form Component
//!
//! Form for adding a line item. New items go to the highlighted person,
//! or to everyone when "Shared" is ticked.

use leptos::prelude::*;

use crate::context::use_split_context;
use crate::format::parse_amount;
use crate::store::{store_add_item, use_split_store, with_session};

#[component]
pub fn NewItemForm() -> impl IntoView {
    let store = use_split_store();
    let ctx = use_split_context();

    let (new_name, set_new_name) = signal(String::new());
    let (new_price, set_new_price) = signal(String::new());
    let (shared, set_shared) = signal(false);

    let create_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        if name.trim().is_empty() {
            return;
        }
        let price = parse_amount(&new_price.get()).unwrap_or(f64::NAN);
        let assignees: Vec<String> = if shared.get() {
            with_session(&store, |s| s.bill().people.iter().map(|p| p.id.clone()).collect())
        } else {
            ctx.highlighted.get().into_iter().collect()
        };

        if let Some(id) = store_add_item(&store, &name, price, assignees) {
            web_sys::console::log_1(&format!("[FORM] Added {} ({})", id, name).into());
            set_new_name.set(String::new());
            set_new_price.set(String::new());
        }
    };

    view! {
        <form class="new-item-form" on:submit=create_item>
            <div class="new-item-row">
                <input
                    type="text"
                    class="item-name-input"
                    placeholder=move || {
                        if ctx.highlighted.get().is_some() {
                            "Add item for the highlighted person..."
                        } else {
                            "Add item..."
                        }
                    }
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    class="item-price-input"
                    inputmode="decimal"
                    placeholder="0.00"
                    prop:value=move || new_price.get()
                    on:input=move |ev| set_new_price.set(event_target_value(&ev))
                />
                <label class="shared-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || shared.get()
                        on:change=move |ev| set_shared.set(event_target_checked(&ev))
                    />
                    "Shared"
                </label>
                <button type="submit">"Add"</button>
            </div>
        </form>
    }
}
