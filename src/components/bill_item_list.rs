//! Bill Item List Component
//!
//! One row per line item with its price, per-person share and a toggle
//! for each person. Rows are drop targets for person chips.

use bill_split::BillItem;
use leptos::prelude::*;
use leptos_dragdrop::{make_on_mouseleave, make_on_target_mouseenter};

use crate::components::{AmountInput, DeleteConfirmButton};
use crate::context::use_split_context;
use crate::format::format_money;
use crate::store::{
    store_assign_everyone, store_clear_assignees, store_remove_item, store_set_item_price,
    store_toggle_assignment, use_split_store, with_session,
};

#[component]
pub fn BillItemList() -> impl IntoView {
    let store = use_split_store();

    let items = move || with_session(&store, |s| s.bill().items.clone());
    let is_empty = move || with_session(&store, |s| s.bill().items.is_empty());

    view! {
        <section class="bill-items">
            <Show when=is_empty>
                <p class="empty-hint">"No items yet. Add what was ordered above."</p>
            </Show>
            <For
                each=items
                key=|item| (item.id.clone(), item.name.clone(), item.price.to_bits(), item.assigned_to.clone())
                children=move |item| view! { <BillItemRow item=item /> }
            />
        </section>
    }
}

#[component]
fn BillItemRow(item: BillItem) -> impl IntoView {
    let store = use_split_store();
    let ctx = use_split_context();

    let item_id = item.id.clone();
    let assigned_to = item.assigned_to.clone();
    let per_person = (!item.is_unassigned()).then(|| item.price / item.assigned_to.len() as f64);

    let on_mouseenter = make_on_target_mouseenter(ctx.dnd, item_id.clone());
    let on_mouseleave = make_on_mouseleave(ctx.dnd);

    let row_class = {
        let item_id = item_id.clone();
        let assigned_to = assigned_to.clone();
        move || {
            let mut class = String::from("bill-item");
            if assigned_to.is_empty() {
                class.push_str(" unassigned");
            }
            if ctx.dnd.is_drop_target(&item_id) {
                class.push_str(" drop-target");
            }
            let highlighted = ctx.highlighted.with(|h| {
                h.as_ref().is_some_and(|person_id| assigned_to.contains(person_id))
            });
            if highlighted {
                class.push_str(" highlighted");
            }
            class
        }
    };

    let price = item.price;
    let price_id = item_id.clone();
    let everyone_id = item_id.clone();
    let clear_id = item_id.clone();
    let delete_id = item_id.clone();

    let toggles = move || {
        let people = with_session(&store, |s| s.bill().people.clone());
        let views = people
            .into_iter()
            .map(|person| {
                let active = assigned_to.contains(&person.id);
                let item_id = item_id.clone();
                let person_id = person.id;
                view! {
                    <button
                        type="button"
                        class={if active { "assignee-btn active" } else { "assignee-btn" }}
                        on:click=move |_| store_toggle_assignment(&store, &item_id, &person_id)
                    >
                        {person.name}
                    </button>
                }
            })
            .collect_view();
        views
    };

    view! {
        <div class=row_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
            <div class="item-header">
                <span class="item-name">{item.name.clone()}</span>
                <AmountInput
                    label=""
                    value=Signal::derive(move || price)
                    on_commit=move |amount: f64| store_set_item_price(&store, &price_id, amount)
                />
                <span class="item-share">
                    {match per_person {
                        Some(share) => format!("{} each", format_money(share)),
                        None => "Not assigned".to_string(),
                    }}
                </span>
                <DeleteConfirmButton
                    button_class="delete-btn"
                    title="Remove item"
                    on_confirm=move |_| store_remove_item(&store, &delete_id)
                />
            </div>
            <div class="assignees">
                {toggles}
                <button
                    type="button"
                    class="shortcut-btn"
                    on:click=move |_| store_assign_everyone(&store, &everyone_id)
                >
                    "Everyone"
                </button>
                <button
                    type="button"
                    class="shortcut-btn"
                    on:click=move |_| store_clear_assignees(&store, &clear_id)
                >
                    "Clear"
                </button>
            </div>
        </div>
    }
}
