//! Top navigation bar with the signed-in user and sign-out.

use leptos::prelude::*;

use crate::net::auth::HttpAuthService;
use crate::state::auth::{AuthState, sign_out};
use crate::util::navigate::install_pending_navigation;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let pending = RwSignal::new(None::<String>);
    install_pending_navigation(pending);

    let display_name = move || {
        auth.get()
            .user
            .map(|user| user.display_name().to_owned())
            .unwrap_or_default()
    };

    let on_sign_out = move |_| {
        leptos::task::spawn_local(async move {
            if sign_out(auth, &HttpAuthService).await {
                pending.set(Some("/login".to_owned()));
            }
        });
    };

    view! {
        <nav class="nav-bar">
            <a href="/" class="nav-bar__brand">"Recipes"</a>
            <Show when=move || auth.get().is_authenticated>
                <a href="/addRecipe" class="nav-bar__link">"Add Recipe"</a>
                <a href="/myRecipes" class="nav-bar__link">"My Recipes"</a>
            </Show>
            <span class="nav-bar__spacer"></span>
            <Show
                when=move || auth.get().is_authenticated
                fallback=|| view! { <a href="/login" class="nav-bar__link">"Sign In"</a> }
            >
                <span class="nav-bar__user">{display_name}</span>
                <button class="btn nav-bar__sign-out" on:click=on_sign_out>
                    "Sign Out"
                </button>
            </Show>
        </nav>
    }
}
