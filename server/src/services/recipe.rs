//! `Recipe` persistence.

use async_trait::async_trait;
use schema::{Recipe, RecipeDraft, RecipeFilter};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::records::{RecordError, RecordStore, not_found, select_columns};

const COLUMNS: &[&str] = &[
    "id",
    "created_by",
    "name",
    "description",
    "course",
    "time",
    "num_servings",
    "difficulty",
    "ingredients",
    "instructions",
    "owner",
    "image_file_names",
    "average_rating",
    "num_reviews",
];

fn recipe_from_row(row: &PgRow) -> Recipe {
    Recipe {
        id: row.get("id"),
        created_by: row.get("created_by"),
        name: row.get("name"),
        description: row.get("description"),
        course: row.get("course"),
        time: row.get("time"),
        num_servings: row.get("num_servings"),
        difficulty: row.get("difficulty"),
        ingredients: row.get("ingredients"),
        instructions: row.get("instructions"),
        owner: row.get("owner"),
        image_file_names: row.get("image_file_names"),
        average_rating: row.get("average_rating"),
        num_reviews: row.get("num_reviews"),
        created_at: row.get("created_at_ms"),
        updated_at: row.get("updated_at_ms"),
    }
}

#[async_trait]
impl RecordStore for Recipe {
    const TABLE: &'static str = "recipes";

    async fn list(pool: &PgPool, filter: &RecipeFilter) -> Result<Vec<Self>, RecordError> {
        let sql = format!(
            "SELECT {} FROM recipes WHERE ($1::text IS NULL OR owner = $1) ORDER BY created_at DESC, id",
            select_columns(COLUMNS)
        );
        let rows = sqlx::query(&sql)
            .bind(filter.owner.as_deref())
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().map(recipe_from_row).collect())
    }

    async fn get(pool: &PgPool, id: Uuid) -> Result<Self, RecordError> {
        let sql = format!("SELECT {} FROM recipes WHERE id = $1", select_columns(COLUMNS));
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Self>(id))?;
        Ok(recipe_from_row(&row))
    }

    async fn create(pool: &PgPool, draft: RecipeDraft) -> Result<Self, RecordError> {
        let sql = format!(
            r"INSERT INTO recipes
                  (created_by, name, description, course, time, num_servings, difficulty,
                   ingredients, instructions, owner, image_file_names, average_rating, num_reviews)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
              RETURNING {}",
            select_columns(COLUMNS)
        );
        let row = sqlx::query(&sql)
            .bind(draft.created_by.unwrap_or_default())
            .bind(draft.name.unwrap_or_default())
            .bind(draft.description.unwrap_or_default())
            .bind(draft.course.unwrap_or_default())
            .bind(draft.time.unwrap_or_default())
            .bind(draft.num_servings.unwrap_or_default())
            .bind(draft.difficulty.unwrap_or_default())
            .bind(draft.ingredients.unwrap_or_default())
            .bind(draft.instructions.unwrap_or_default())
            .bind(draft.owner.unwrap_or_default())
            .bind(draft.image_file_names.unwrap_or_default())
            .bind(draft.average_rating)
            .bind(draft.num_reviews)
            .fetch_one(pool)
            .await?;
        Ok(recipe_from_row(&row))
    }

    async fn update(pool: &PgPool, id: Uuid, draft: RecipeDraft) -> Result<Self, RecordError> {
        let sql = format!(
            r"UPDATE recipes SET
                  created_by = COALESCE($2, created_by),
                  name = COALESCE($3, name),
                  description = COALESCE($4, description),
                  course = COALESCE($5, course),
                  time = COALESCE($6, time),
                  num_servings = COALESCE($7, num_servings),
                  difficulty = COALESCE($8, difficulty),
                  ingredients = COALESCE($9, ingredients),
                  instructions = COALESCE($10, instructions),
                  owner = COALESCE($11, owner),
                  image_file_names = COALESCE($12, image_file_names),
                  average_rating = COALESCE($13, average_rating),
                  num_reviews = COALESCE($14, num_reviews),
                  updated_at = now()
              WHERE id = $1
              RETURNING {}",
            select_columns(COLUMNS)
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(draft.created_by)
            .bind(draft.name)
            .bind(draft.description)
            .bind(draft.course)
            .bind(draft.time)
            .bind(draft.num_servings)
            .bind(draft.difficulty)
            .bind(draft.ingredients)
            .bind(draft.instructions)
            .bind(draft.owner)
            .bind(draft.image_file_names)
            .bind(draft.average_rating)
            .bind(draft.num_reviews)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Self>(id))?;
        Ok(recipe_from_row(&row))
    }
}
