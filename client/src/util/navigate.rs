//! Deferred navigation driven by a signal.
//!
//! Handlers rendered inside `<Show>` cannot capture the router's navigate
//! closure. They set a target path and this effect navigates.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

/// Navigate to `target` whenever it is set, clearing it first.
pub fn install_pending_navigation(target: RwSignal<Option<String>>) {
    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(path) = target.get() {
            target.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });
}
