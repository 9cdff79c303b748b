use super::*;
use schema::{Recipe, RecipeFilter, ReviewFilter, SavedRecipeFilter};

#[test]
fn collection_endpoint_uses_model_collection() {
    assert_eq!(collection_endpoint(Model::SavedRecipe), "/api/saved-recipes");
    assert_eq!(collection_endpoint(Model::Recipe), "/api/recipes");
}

#[test]
fn record_endpoint_appends_id() {
    let id = Uuid::nil();
    assert_eq!(record_endpoint(Model::Review, id), "/api/reviews/00000000-0000-0000-0000-000000000000");
}

#[test]
fn list_endpoint_without_filter_has_no_query() {
    assert_eq!(list_endpoint(Model::Recipe, &RecipeFilter::default()), "/api/recipes");
}

#[test]
fn list_endpoint_encodes_filter_values() {
    let filter = RecipeFilter { owner: Some("a b&c@example.com".to_owned()) };
    assert_eq!(list_endpoint(Model::Recipe, &filter), "/api/recipes?owner=a%20b%26c%40example.com");
}

#[test]
fn list_endpoint_joins_multiple_pairs() {
    let user = Uuid::from_u128(1);
    let recipe = Uuid::from_u128(2);
    let filter = SavedRecipeFilter { user_id: Some(user), recipe_id: Some(recipe) };
    assert_eq!(
        list_endpoint(Model::SavedRecipe, &filter),
        format!("/api/saved-recipes?userId={user}&recipeId={recipe}")
    );
    let reviews = ReviewFilter { recipe_id: Some(recipe) };
    assert_eq!(list_endpoint(Model::Review, &reviews), format!("/api/reviews?recipeId={recipe}"));
}

#[test]
fn request_failed_message_formats_status() {
    assert_eq!(request_failed_message("verify code", 400), "verify code failed: 400");
}

#[test]
fn object_url_keeps_slashes_and_encodes_segments() {
    assert_eq!(object_url("recipe-manager/abc-my pie.jpg"), "/api/storage/recipe-manager/abc-my%20pie.jpg");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_side_stubs_return_errors() {
    let result = futures::executor::block_on(RecordClient::<Recipe>::new().list(&RecipeFilter::default()));
    assert!(result.is_err());
    assert!(futures::executor::block_on(fetch_current_user()).is_err());
}
