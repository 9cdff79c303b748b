//! Edit an existing recipe's text fields.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use schema::Recipe;
use uuid::Uuid;

use crate::components::recipe_form::RecipeFormFields;
use crate::net::api::RecordClient;
use crate::util::forms::RecipeForm;
use crate::util::navigate::install_pending_navigation;

#[component]
pub fn EditRecipePage() -> impl IntoView {
    let params = use_params_map();
    let form = RwSignal::new(RecipeForm::default());
    let loaded = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let message = RwSignal::new(None::<String>);
    let pending = RwSignal::new(None::<String>);
    install_pending_navigation(pending);

    let recipe_id = move || params.read().get("id").and_then(|raw| Uuid::parse_str(&raw).ok());

    Effect::new(move || {
        let Some(id) = recipe_id() else {
            message.set(Some("Unknown recipe.".to_owned()));
            return;
        };
        leptos::task::spawn_local(async move {
            match RecordClient::<Recipe>::new().get(id).await {
                Ok(recipe) => {
                    form.set(RecipeForm::from_recipe(&recipe));
                    loaded.set(true);
                }
                Err(e) => message.set(Some(format!("Could not load recipe: {e}"))),
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(id) = params.with_untracked(|p| p.get("id").and_then(|raw| Uuid::parse_str(&raw).ok())) else {
            return;
        };
        let current = form.get();
        if let Err(problem) = current.validate() {
            message.set(Some(problem));
            return;
        }
        busy.set(true);
        message.set(Some("Saving...".to_owned()));

        leptos::task::spawn_local(async move {
            match RecordClient::<Recipe>::new().update(id, &current.to_draft()).await {
                Ok(recipe) => pending.set(Some(format!("/recipe/{}", recipe.id))),
                Err(e) => {
                    message.set(Some(format!("Could not save recipe: {e}")));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <section class="edit-recipe-page">
            <h1>"Edit Recipe"</h1>
            <Show when=move || loaded.get()>
                <form on:submit=on_submit>
                    <RecipeFormFields form/>
                    <button class="btn" type="submit" disabled=move || busy.get()>
                        "Save Changes"
                    </button>
                </form>
            </Show>
            <Show when=move || message.get().is_some()>
                <p class="page__message">{move || message.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}
