//! Summary card linking to a recipe's detail page.

use leptos::prelude::*;
use schema::Recipe;

use crate::net::api::object_url;
use crate::util::rating::star_string;

#[component]
pub fn RecipeCard(recipe: Recipe) -> impl IntoView {
    let href = format!("/recipe/{}", recipe.id);
    let image = recipe.image_file_names.first().map(|key| object_url(key));
    let stars = star_string(recipe.average_rating);
    let reviews = recipe.num_reviews.unwrap_or(0);

    view! {
        <a class="recipe-card" href=href>
            {image.map(|src| view! { <img class="recipe-card__image" src=src alt=""/> })}
            <div class="recipe-card__body">
                <h3 class="recipe-card__name">{recipe.name}</h3>
                <p class="recipe-card__meta">
                    {recipe.course} " · " {recipe.time} " · " {recipe.difficulty}
                </p>
                <p class="recipe-card__rating">
                    {stars} " (" {reviews} ")"
                </p>
            </div>
        </a>
    }
}
