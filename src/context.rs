//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos_dragdrop::DndSignals;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct SplitContext {
    /// Person whose items are highlighted - read
    pub highlighted: ReadSignal<Option<String>>,
    /// Person whose items are highlighted - write
    set_highlighted: WriteSignal<Option<String>>,
    /// Drag state: people column drags, item rows receive
    pub dnd: DndSignals,
}

impl SplitContext {
    pub fn new(
        highlighted: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
        dnd: DndSignals,
    ) -> Self {
        Self {
            highlighted: highlighted.0,
            set_highlighted: highlighted.1,
            dnd,
        }
    }

    /// Highlight a person, or clear the highlight if they already are
    pub fn toggle_highlight(&self, person_id: &str) {
        self.set_highlighted.update(|current| {
            if current.as_deref() == Some(person_id) {
                *current = None;
            } else {
                *current = Some(person_id.to_string());
            }
        });
    }

    pub fn is_highlighted(&self, person_id: &str) -> bool {
        self.highlighted.with(|h| h.as_deref() == Some(person_id))
    }
}

/// Get the split context
pub fn use_split_context() -> SplitContext {
    use_context::<SplitContext>().expect("SplitContext should be provided")
}
