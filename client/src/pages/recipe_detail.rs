//! Recipe detail: the recipe, its reviews, favorites, and owner actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Posting a review also refreshes the recipe's `averageRating` and
//! `numReviews` from the full review list, since the server keeps no
//! aggregates of its own.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use schema::{Recipe, Review, ReviewDraft, ReviewFilter, SavedRecipe, SavedRecipeDraft, SavedRecipeFilter};
use uuid::Uuid;

use crate::net::api::{RecordClient, delete_object, object_url};
use crate::state::auth::AuthState;
use crate::util::forms::parse_stars;
use crate::util::navigate::install_pending_navigation;
use crate::util::rating::{rating_update, star_string};

/// Create `draft`, then recompute and store the recipe's rating aggregates.
async fn post_review(recipe_id: Uuid, draft: ReviewDraft) -> Result<(Recipe, Vec<Review>), String> {
    RecordClient::<Review>::new().create(&draft).await?;
    let reviews = RecordClient::<Review>::new()
        .list(&ReviewFilter { recipe_id: Some(recipe_id) })
        .await?;
    let recipe = RecordClient::<Recipe>::new()
        .update(recipe_id, &rating_update(&reviews))
        .await?;
    Ok((recipe, reviews))
}

/// Delete the recipe's stored images, then the recipe itself. Image
/// failures are logged and do not stop the delete.
async fn delete_recipe(recipe: &Recipe) -> Result<(), String> {
    for key in &recipe.image_file_names {
        if let Err(e) = delete_object(key).await {
            leptos::logging::warn!("image delete failed for {key}: {e}");
        }
    }
    RecordClient::<Recipe>::new().delete(recipe.id).await
}

#[component]
pub fn RecipeDetailPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();

    let recipe = RwSignal::new(None::<Recipe>);
    let reviews = RwSignal::new(Vec::<Review>::new());
    let saved = RwSignal::new(None::<SavedRecipe>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let review_stars = RwSignal::new("5".to_owned());
    let review_text = RwSignal::new(String::new());
    let pending = RwSignal::new(None::<String>);
    install_pending_navigation(pending);

    let recipe_id = move || params.read().get("id").and_then(|raw| Uuid::parse_str(&raw).ok());

    Effect::new(move || {
        let Some(id) = recipe_id() else {
            error.set(Some("Unknown recipe.".to_owned()));
            return;
        };
        leptos::task::spawn_local(async move {
            match RecordClient::<Recipe>::new().get(id).await {
                Ok(found) => recipe.set(Some(found)),
                Err(e) => error.set(Some(format!("Could not load recipe: {e}"))),
            }
            match RecordClient::<Review>::new()
                .list(&ReviewFilter { recipe_id: Some(id) })
                .await
            {
                Ok(list) => reviews.set(list),
                Err(e) => leptos::logging::warn!("review list failed: {e}"),
            }
        });
    });

    Effect::new(move || {
        let (Some(id), Some(user)) = (recipe_id(), auth.get().user) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let filter = SavedRecipeFilter { user_id: Some(user.id), recipe_id: Some(id) };
            match RecordClient::<SavedRecipe>::new().list(&filter).await {
                Ok(list) => saved.set(list.into_iter().next()),
                Err(e) => leptos::logging::warn!("saved recipe lookup failed: {e}"),
            }
        });
    });

    let is_owner = move || {
        let owner = recipe.with(|r| r.as_ref().map(|r| r.owner.clone()));
        let user_id = auth.with(|a| a.user.as_ref().map(|u| u.id.to_string()));
        owner.is_some() && owner == user_id
    };

    let on_review = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(id) = recipe_id() else {
            return;
        };
        let Some(stars) = parse_stars(&review_stars.get()) else {
            error.set(Some("Pick between 1 and 5 stars.".to_owned()));
            return;
        };
        let user = auth.get().user;
        let draft = ReviewDraft {
            review_stars: Some(stars),
            review_text: Some(review_text.get().trim().to_owned()),
            recipe_id: Some(id),
            created_by: user.as_ref().map(|u| u.display_name().to_owned()),
            owner: user.as_ref().map(|u| u.id.to_string()),
        };
        busy.set(true);
        leptos::task::spawn_local(async move {
            match post_review(id, draft).await {
                Ok((updated, list)) => {
                    recipe.set(Some(updated));
                    reviews.set(list);
                    review_text.set(String::new());
                    error.set(None);
                }
                Err(e) => error.set(Some(format!("Could not post review: {e}"))),
            }
            busy.set(false);
        });
    };

    let on_toggle_save = move |_| {
        let (Some(id), Some(user)) = (recipe_id(), auth.get().user) else {
            return;
        };
        let current = saved.get();
        leptos::task::spawn_local(async move {
            let client = RecordClient::<SavedRecipe>::new();
            let result = match current {
                Some(existing) => client.delete(existing.id).await.map(|()| None),
                None => client
                    .create(&SavedRecipeDraft { user_id: Some(user.id), recipe_id: Some(id) })
                    .await
                    .map(Some),
            };
            match result {
                Ok(next) => saved.set(next),
                Err(e) => error.set(Some(format!("Could not update favorites: {e}"))),
            }
        });
    };

    let on_delete = move |_| {
        let Some(current) = recipe.get() else {
            return;
        };
        busy.set(true);
        leptos::task::spawn_local(async move {
            match delete_recipe(&current).await {
                Ok(()) => pending.set(Some("/myRecipes".to_owned())),
                Err(e) => {
                    error.set(Some(format!("Could not delete recipe: {e}")));
                    busy.set(false);
                }
            }
        });
    };

    let edit_href = move || recipe_id().map(|id| format!("/recipe/{id}/edit")).unwrap_or_default();

    view! {
        <section class="recipe-detail-page">
            <Show when=move || error.get().is_some()>
                <p class="page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || recipe.get().is_some() fallback=|| view! { <p>"Loading recipe..."</p> }>
                {move || recipe.get().map(|r| view! {
                    <header class="recipe-detail__header">
                        <h1>{r.name}</h1>
                        <p class="recipe-detail__meta">
                            {r.course} " · " {r.time} " · serves " {r.num_servings} " · " {r.difficulty}
                        </p>
                        <p class="recipe-detail__rating">
                            {star_string(r.average_rating)} " (" {r.num_reviews.unwrap_or(0)} " reviews)"
                        </p>
                        <p class="recipe-detail__author">"By " {r.created_by}</p>
                    </header>
                    <div class="recipe-detail__images">
                        {r.image_file_names
                            .iter()
                            .map(|key| view! { <img src=object_url(key) alt=""/> })
                            .collect_view()}
                    </div>
                    <p class="recipe-detail__description">{r.description}</p>
                    <h2>"Ingredients"</h2>
                    <ul>{r.ingredients.into_iter().map(|i| view! { <li>{i}</li> }).collect_view()}</ul>
                    <h2>"Instructions"</h2>
                    <ol>{r.instructions.into_iter().map(|i| view! { <li>{i}</li> }).collect_view()}</ol>
                })}
                <div class="recipe-detail__actions">
                    <button class="btn" on:click=on_toggle_save>
                        {move || if saved.get().is_some() { "Unsave" } else { "Save to favorites" }}
                    </button>
                    <Show when=is_owner>
                        <a class="btn" href=edit_href>"Edit"</a>
                        <button
                            class="btn btn--danger"
                            disabled=move || busy.get()
                            on:click=on_delete
                        >
                            "Delete"
                        </button>
                    </Show>
                </div>
            </Show>

            <h2>"Reviews"</h2>
            <form class="review-form" on:submit=on_review>
                <select
                    prop:value=move || review_stars.get()
                    on:change=move |ev| review_stars.set(event_target_value(&ev))
                >
                    {(1..=5)
                        .rev()
                        .map(|n| view! { <option value=n.to_string()>{star_string(Some(n))}</option> })
                        .collect_view()}
                </select>
                <textarea
                    rows="3"
                    placeholder="What did you think?"
                    prop:value=move || review_text.get()
                    on:input=move |ev| review_text.set(event_target_value(&ev))
                ></textarea>
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Post Review"
                </button>
            </form>
            <ul class="review-list">
                <For
                    each=move || reviews.get()
                    key=|review| review.id
                    children=|review| view! {
                        <li class="review">
                            <span class="review__stars">{star_string(review.review_stars)}</span>
                            <span class="review__author">{review.created_by}</span>
                            <p class="review__text">{review.review_text}</p>
                        </li>
                    }
                />
            </ul>
        </section>
    }
}
