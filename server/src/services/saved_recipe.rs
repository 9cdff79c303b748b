//! `SavedRecipe` persistence (user ↔ recipe favorites).

use async_trait::async_trait;
use schema::{SavedRecipe, SavedRecipeDraft, SavedRecipeFilter};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::records::{RecordError, RecordStore, not_found, select_columns};

const COLUMNS: &[&str] = &["id", "user_id", "recipe_id"];

fn saved_recipe_from_row(row: &PgRow) -> SavedRecipe {
    SavedRecipe {
        id: row.get("id"),
        user_id: row.get("user_id"),
        recipe_id: row.get("recipe_id"),
        created_at: row.get("created_at_ms"),
        updated_at: row.get("updated_at_ms"),
    }
}

#[async_trait]
impl RecordStore for SavedRecipe {
    const TABLE: &'static str = "saved_recipes";

    async fn list(pool: &PgPool, filter: &SavedRecipeFilter) -> Result<Vec<Self>, RecordError> {
        let sql = format!(
            r"SELECT {} FROM saved_recipes
              WHERE ($1::uuid IS NULL OR user_id = $1)
                AND ($2::uuid IS NULL OR recipe_id = $2)
              ORDER BY created_at DESC, id",
            select_columns(COLUMNS)
        );
        let rows = sqlx::query(&sql)
            .bind(filter.user_id)
            .bind(filter.recipe_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().map(saved_recipe_from_row).collect())
    }

    async fn get(pool: &PgPool, id: Uuid) -> Result<Self, RecordError> {
        let sql = format!("SELECT {} FROM saved_recipes WHERE id = $1", select_columns(COLUMNS));
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Self>(id))?;
        Ok(saved_recipe_from_row(&row))
    }

    async fn create(pool: &PgPool, draft: SavedRecipeDraft) -> Result<Self, RecordError> {
        let user_id = draft.user_id.ok_or(RecordError::MissingField("userId"))?;
        let recipe_id = draft.recipe_id.ok_or(RecordError::MissingField("recipeId"))?;
        let sql = format!(
            "INSERT INTO saved_recipes (user_id, recipe_id) VALUES ($1, $2) RETURNING {}",
            select_columns(COLUMNS)
        );
        let row = sqlx::query(&sql)
            .bind(user_id)
            .bind(recipe_id)
            .fetch_one(pool)
            .await?;
        Ok(saved_recipe_from_row(&row))
    }

    async fn update(pool: &PgPool, id: Uuid, draft: SavedRecipeDraft) -> Result<Self, RecordError> {
        let sql = format!(
            r"UPDATE saved_recipes SET
                  user_id = COALESCE($2, user_id),
                  recipe_id = COALESCE($3, recipe_id),
                  updated_at = now()
              WHERE id = $1
              RETURNING {}",
            select_columns(COLUMNS)
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(draft.user_id)
            .bind(draft.recipe_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Self>(id))?;
        Ok(saved_recipe_from_row(&row))
    }
}
