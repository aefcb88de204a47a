//! Error Banner Component
//!
//! Shows the last rejected change until it is dismissed or a later change succeeds.

use leptos::prelude::*;

use crate::store::{clear_error, last_error, use_split_store};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let store = use_split_store();

    move || {
        last_error(&store).map(|message| {
            view! {
                <div class="error-banner" role="alert">
                    <span class="error-text">{message}</span>
                    <button
                        type="button"
                        class="dismiss-btn"
                        on:click=move |_| clear_error(&store)
                    >
                        "Dismiss"
                    </button>
                </div>
            }
        })
    }
}
