//! Recipe list: every recipe, newest first.

use leptos::prelude::*;
use schema::{Recipe, RecipeFilter};

use crate::components::recipe_card::RecipeCard;
use crate::net::api::RecordClient;

#[component]
pub fn RecipesPage() -> impl IntoView {
    let recipes = RwSignal::new(Vec::<Recipe>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        leptos::task::spawn_local(async move {
            match RecordClient::<Recipe>::new().list(&RecipeFilter::default()).await {
                Ok(items) => recipes.set(items),
                Err(e) => {
                    leptos::logging::warn!("recipe list failed: {e}");
                    error.set(Some(format!("Could not load recipes: {e}")));
                }
            }
            loading.set(false);
        });
    });

    view! {
        <section class="recipes-page">
            <h1>"Recipes"</h1>
            <Show when=move || error.get().is_some()>
                <p class="page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading recipes..."</p> }>
                <Show
                    when=move || !recipes.get().is_empty()
                    fallback=|| view! { <p>"No recipes yet. " <a href="/addRecipe">"Add the first one."</a></p> }
                >
                    <div class="recipe-grid">
                        <For
                            each=move || recipes.get()
                            key=|recipe| recipe.id
                            children=|recipe| view! { <RecipeCard recipe=recipe/> }
                        />
                    </div>
                </Show>
            </Show>
        </section>
    }
}
