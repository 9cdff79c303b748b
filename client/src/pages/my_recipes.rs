//! The signed-in user's own recipes and saved favorites.

use leptos::prelude::*;
use schema::{Recipe, RecipeFilter, SavedRecipe, SavedRecipeFilter};
use uuid::Uuid;

use crate::components::recipe_card::RecipeCard;
use crate::net::api::RecordClient;
use crate::state::auth::AuthState;

/// Resolve each saved entry to its recipe. Entries whose recipe can no
/// longer be fetched are skipped.
async fn load_saved_recipes(user_id: Uuid) -> Result<Vec<Recipe>, String> {
    let saved = RecordClient::<SavedRecipe>::new()
        .list(&SavedRecipeFilter { user_id: Some(user_id), recipe_id: None })
        .await?;
    let client = RecordClient::<Recipe>::new();
    let mut recipes = Vec::with_capacity(saved.len());
    for entry in saved {
        match client.get(entry.recipe_id).await {
            Ok(recipe) => recipes.push(recipe),
            Err(e) => leptos::logging::warn!("saved recipe {} unavailable: {e}", entry.recipe_id),
        }
    }
    Ok(recipes)
}

#[component]
pub fn MyRecipesPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let own = RwSignal::new(Vec::<Recipe>::new());
    let saved = RwSignal::new(Vec::<Recipe>::new());
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        let Some(user) = auth.get().user else {
            return;
        };
        leptos::task::spawn_local(async move {
            let filter = RecipeFilter { owner: Some(user.id.to_string()) };
            match RecordClient::<Recipe>::new().list(&filter).await {
                Ok(list) => own.set(list),
                Err(e) => error.set(Some(format!("Could not load your recipes: {e}"))),
            }
            match load_saved_recipes(user.id).await {
                Ok(list) => saved.set(list),
                Err(e) => error.set(Some(format!("Could not load saved recipes: {e}"))),
            }
        });
    });

    view! {
        <section class="my-recipes-page">
            <Show when=move || error.get().is_some()>
                <p class="page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <h1>"My Recipes"</h1>
            <Show when=move || !own.get().is_empty() fallback=|| view! { <p>"You have not added any recipes yet."</p> }>
                <div class="recipe-grid">
                    <For
                        each=move || own.get()
                        key=|recipe| recipe.id
                        children=|recipe| view! { <RecipeCard recipe=recipe/> }
                    />
                </div>
            </Show>
            <h2>"Saved Recipes"</h2>
            <Show when=move || !saved.get().is_empty() fallback=|| view! { <p>"No saved recipes."</p> }>
                <div class="recipe-grid">
                    <For
                        each=move || saved.get()
                        key=|recipe| recipe.id
                        children=|recipe| view! { <RecipeCard recipe=recipe/> }
                    />
                </div>
            </Show>
        </section>
    }
}
