//! Record types exchanged over the REST API.
//!
//! DESIGN
//! ======
//! Each declared model has three shapes: the stored record (ids and
//! timestamps assigned by the server), a draft with every field optional
//! (used for both create and partial update), and a list filter. Field
//! names are camelCase on the wire to match the declared schema.

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::Model;

/// Ties a record type to its declared model, draft, and list filter.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Declared model this record belongs to.
    const MODEL: Model;
    /// Create/update payload.
    type Draft: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static;
    /// List filter decoded from the query string.
    type Filter: ListFilter + Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static;

    /// Server-assigned record id.
    fn id(&self) -> Uuid;
}

/// A list filter that can render itself as query-string pairs.
pub trait ListFilter {
    /// Non-empty filter criteria as `(key, value)` pairs, unencoded.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

// =============================================================================
// USER
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ListFilter for UserFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.email.iter().map(|email| ("email", email.clone())).collect()
    }
}

impl Record for User {
    const MODEL: Model = Model::User;
    type Draft = UserDraft;
    type Filter = UserFilter;

    fn id(&self) -> Uuid {
        self.id
    }
}

// =============================================================================
// RECIPE
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub created_by: String,
    pub name: String,
    pub description: String,
    pub course: String,
    pub time: String,
    pub num_servings: String,
    pub difficulty: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub owner: String,
    pub image_file_names: Vec<String>,
    pub average_rating: Option<i32>,
    pub num_reviews: Option<i32>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_servings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_file_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_reviews: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl ListFilter for RecipeFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.owner.iter().map(|owner| ("owner", owner.clone())).collect()
    }
}

impl Record for Recipe {
    const MODEL: Model = Model::Recipe;
    type Draft = RecipeDraft;
    type Filter = RecipeFilter;

    fn id(&self) -> Uuid {
        self.id
    }
}

// =============================================================================
// SAVED RECIPE
// =============================================================================

/// Join record linking a user to a recipe they saved as a favorite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub recipe_id: Uuid,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipeDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<Uuid>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<Uuid>,
}

impl ListFilter for SavedRecipeFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(user_id) = self.user_id {
            pairs.push(("userId", user_id.to_string()));
        }
        if let Some(recipe_id) = self.recipe_id {
            pairs.push(("recipeId", recipe_id.to_string()));
        }
        pairs
    }
}

impl Record for SavedRecipe {
    const MODEL: Model = Model::SavedRecipe;
    type Draft = SavedRecipeDraft;
    type Filter = SavedRecipeFilter;

    fn id(&self) -> Uuid {
        self.id
    }
}

// =============================================================================
// REVIEW
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub review_stars: Option<i32>,
    pub review_text: String,
    pub recipe_id: Uuid,
    pub created_by: String,
    pub owner: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_stars: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<Uuid>,
}

impl ListFilter for ReviewFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.recipe_id
            .iter()
            .map(|recipe_id| ("recipeId", recipe_id.to_string()))
            .collect()
    }
}

impl Record for Review {
    const MODEL: Model = Model::Review;
    type Draft = ReviewDraft;
    type Filter = ReviewFilter;

    fn id(&self) -> Uuid {
        self.id
    }
}
