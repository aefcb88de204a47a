//! Amount Input Component
//!
//! Text input for a money amount. Edits are kept as a draft and committed
//! on change (enter or blur).

use leptos::prelude::*;

use crate::format::parse_amount;

#[component]
pub fn AmountInput(
    #[prop(into)] label: String,
    /// Committed value shown when not editing
    value: Signal<f64>,
    /// Receives the parsed amount; unparseable text arrives as NaN so the
    /// engine reports it like any other invalid amount
    #[prop(into)] on_commit: Callback<f64>,
) -> impl IntoView {
    let (draft, set_draft) = signal(None::<String>);

    let commit = move || {
        if let Some(text) = draft.get_untracked() {
            let amount = parse_amount(&text).unwrap_or(f64::NAN);
            web_sys::console::log_1(&format!("[AMOUNT] commit {:?} -> {}", text, amount).into());
            set_draft.set(None);
            on_commit.run(amount);
        }
    };

    view! {
        <label class="amount-input">
            <span class="amount-label">{label}</span>
            <span class="amount-prefix">"$"</span>
            <input
                type="text"
                inputmode="decimal"
                prop:value=move || draft.get().unwrap_or_else(|| format!("{:.2}", value.get()))
                on:input=move |ev| set_draft.set(Some(event_target_value(&ev)))
                on:change=move |_| commit()
            />
        </label>
    }
}
