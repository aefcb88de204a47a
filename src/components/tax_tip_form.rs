//! Tax & Tip Form Component
//!
//! Bill-level amounts plus quick tip percentages of the subtotal.

use leptos::prelude::*;

use crate::components::AmountInput;
use crate::format::tip_from_percent;
use crate::store::{store_set_tax, store_set_tip, use_split_store, with_session};

const TIP_PERCENTS: &[f64] = &[15.0, 18.0, 20.0];

#[component]
pub fn TaxTipForm() -> impl IntoView {
    let store = use_split_store();

    let tax = Signal::derive(move || with_session(&store, |s| s.bill().tax));
    let tip = Signal::derive(move || with_session(&store, |s| s.bill().tip));

    view! {
        <section class="tax-tip-form">
            <AmountInput
                label="Tax"
                value=tax
                on_commit=move |amount: f64| store_set_tax(&store, amount)
            />
            <AmountInput
                label="Tip"
                value=tip
                on_commit=move |amount: f64| store_set_tip(&store, amount)
            />
            <div class="tip-presets">
                {TIP_PERCENTS.iter().map(|&percent| {
                    view! {
                        <button
                            type="button"
                            class="tip-preset-btn"
                            on:click=move |_| {
                                let subtotal = with_session(&store, |s| s.bill().subtotal());
                                store_set_tip(&store, tip_from_percent(subtotal, percent));
                            }
                        >
                            {format!("{}%", percent)}
                        </button>
                    }
                }).collect_view()}
            </div>
        </section>
    }
}
