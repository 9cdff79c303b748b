//! New-recipe form with optional image uploads.

use leptos::html::Input;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use schema::Recipe;

use crate::components::recipe_form::RecipeFormFields;
use crate::net::api::RecordClient;
use crate::state::auth::AuthState;
use crate::util::forms::RecipeForm;

#[component]
pub fn NewRecipePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let form = RwSignal::new(RecipeForm::default());
    let files = NodeRef::<Input>::new();
    let busy = RwSignal::new(false);
    let message = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let current = form.get();
        if let Err(problem) = current.validate() {
            message.set(Some(problem));
            return;
        }
        let Some(user) = auth.get().user else {
            message.set(Some("Sign in to add a recipe.".to_owned()));
            return;
        };
        busy.set(true);
        message.set(Some("Saving...".to_owned()));

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let images = match upload_selected_images(files).await {
                Ok(keys) => keys,
                Err(e) => {
                    message.set(Some(format!("Image upload failed: {e}")));
                    busy.set(false);
                    return;
                }
            };
            let draft = current.to_new_draft(&user.id.to_string(), user.display_name(), images);
            match RecordClient::<Recipe>::new().create(&draft).await {
                Ok(recipe) => navigate(&format!("/recipe/{}", recipe.id), NavigateOptions::default()),
                Err(e) => {
                    message.set(Some(format!("Could not save recipe: {e}")));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <section class="new-recipe-page">
            <h1>"Add Recipe"</h1>
            <form on:submit=on_submit>
                <RecipeFormFields form/>
                <label class="recipe-form__field">
                    <span>"Photos"</span>
                    <input type="file" accept="image/*" multiple node_ref=files/>
                </label>
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Save Recipe"
                </button>
            </form>
            <Show when=move || message.get().is_some()>
                <p class="page__message">{move || message.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}

/// Upload every file chosen in `input` under `recipe-manager/` and return
/// the stored keys in selection order.
#[allow(clippy::unused_async)]
async fn upload_selected_images(input: NodeRef<Input>) -> Result<Vec<String>, String> {
    #[cfg(feature = "hydrate")]
    {
        let mut keys = Vec::new();
        let Some(list) = input.get_untracked().and_then(|el| el.files()) else {
            return Ok(keys);
        };
        for index in 0..list.length() {
            let Some(file) = list.get(index) else {
                continue;
            };
            let key = schema::recipe_image_key(&uuid::Uuid::new_v4().to_string(), &file.name());
            crate::net::api::upload_file(&key, &file).await?;
            keys.push(key);
        }
        Ok(keys)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = input;
        Ok(Vec::new())
    }
}
