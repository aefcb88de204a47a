//! Summary Panel Component
//!
//! Bill totals, unassigned warning and what each person pays.

use bill_split::settle::format_cents;
use leptos::prelude::*;

use crate::format::{format_money, format_percent};
use crate::store::{use_split_store, with_session};

#[component]
pub fn SummaryPanel() -> impl IntoView {
    let store = use_split_store();

    let allocation = move || with_session(&store, |s| s.allocation().clone());

    let unassigned_warning = move || {
        let unassigned = allocation().unassigned;
        (unassigned > 0.0).then(|| {
            view! {
                <p class="unassigned-warning">
                    {format!("{} of items is not assigned to anyone", format_money(unassigned))}
                </p>
            }
        })
    };

    let rows = move || {
        let (people, allocation, settlement) = with_session(&store, |s| {
            (s.bill().people.clone(), s.allocation().clone(), s.settlement())
        });
        let views = people
            .into_iter()
            .map(|person| {
                let share = allocation.share(&person.id).cloned().unwrap_or_default();
                let cents = settlement.cents_for(&person.id).unwrap_or(0);
                view! {
                    <li class="settlement-row">
                        <span class="settlement-name">{person.name}</span>
                        <span class="settlement-detail">
                            {format!(
                                "{} food + {} tax & tip ({})",
                                format_money(share.item_share),
                                format_money(share.tax_tip_share),
                                format_percent(share.proportion),
                            )}
                        </span>
                        <span class="settlement-amount">{format!("${}", format_cents(cents))}</span>
                    </li>
                }
            })
            .collect_view();
        views
    };

    view! {
        <aside class="summary-panel">
            <h2>"Summary"</h2>
            <dl class="totals">
                <dt>"Subtotal"</dt>
                <dd>{move || format_money(allocation().subtotal)}</dd>
                <dt>"Tax"</dt>
                <dd>{move || format_money(allocation().tax)}</dd>
                <dt>"Tip"</dt>
                <dd>{move || format_money(allocation().tip)}</dd>
                <dt class="grand-total">"Total"</dt>
                <dd class="grand-total">{move || format_money(allocation().grand_total())}</dd>
            </dl>
            {unassigned_warning}
            <h3>"Each person pays"</h3>
            <ul class="settlement">{rows}</ul>
        </aside>
    }
}
