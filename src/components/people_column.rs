//! People Column Component
//!
//! Everyone at the table with their running total. Click a chip to
//! highlight that person's items; drag it onto an item to toggle them.

use bill_split::Person;
use leptos::prelude::*;
use leptos_dragdrop::make_on_mousedown;

use crate::components::DeleteConfirmButton;
use crate::context::use_split_context;
use crate::format::{format_money, initials};
use crate::store::{store_add_person, store_remove_person, use_split_store, with_session};

#[component]
pub fn PeopleColumn() -> impl IntoView {
    let store = use_split_store();

    let (new_name, set_new_name) = signal(String::new());

    let add_person = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        if name.trim().is_empty() {
            return;
        }
        if let Some(id) = store_add_person(&store, &name) {
            web_sys::console::log_1(&format!("[PEOPLE] Added {} ({})", id, name).into());
            set_new_name.set(String::new());
        }
    };

    let people = move || with_session(&store, |s| s.bill().people.clone());

    view! {
        <aside class="people-column">
            <h2>"People"</h2>
            <div class="people-list">
                <For
                    each=people
                    key=|person| (person.id.clone(), person.name.clone(), person.total().to_bits())
                    children=move |person| view! { <PersonChip person=person /> }
                />
            </div>
            <form class="new-person-form" on:submit=add_person>
                <input
                    type="text"
                    placeholder="Add person..."
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </form>
            <p class="drag-hint">"Drag a name onto an item to add or remove them."</p>
        </aside>
    }
}

#[component]
fn PersonChip(person: Person) -> impl IntoView {
    let store = use_split_store();
    let ctx = use_split_context();

    let on_mousedown = make_on_mousedown(ctx.dnd, person.id.clone());

    let chip_class = {
        let person_id = person.id.clone();
        move || {
            let mut class = String::from("person-chip");
            if ctx.is_highlighted(&person_id) {
                class.push_str(" highlighted");
            }
            if ctx.dnd.is_dragging(&person_id) {
                class.push_str(" dragging");
            }
            class
        }
    };

    let click_id = person.id.clone();
    let delete_id = person.id.clone();

    view! {
        <div
            class=chip_class
            on:mousedown=on_mousedown
            on:click=move |_| {
                // A drop also fires click on the chip under the pointer
                if ctx.dnd.drag_just_ended_read.get_untracked() {
                    return;
                }
                ctx.toggle_highlight(&click_id);
            }
        >
            <span class="person-initials">{initials(&person.name)}</span>
            <span class="person-name">{person.name.clone()}</span>
            <span class="person-total">{format_money(person.total())}</span>
            <DeleteConfirmButton
                button_class="delete-btn"
                title="Remove person"
                on_confirm=move |_| store_remove_person(&store, &delete_id)
            />
        </div>
    }
}
