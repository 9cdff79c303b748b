//! `Review` persistence.

use async_trait::async_trait;
use schema::{Review, ReviewDraft, ReviewFilter};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::records::{RecordError, RecordStore, not_found, select_columns};

const COLUMNS: &[&str] = &["id", "review_stars", "review_text", "recipe_id", "created_by", "owner"];

fn review_from_row(row: &PgRow) -> Review {
    Review {
        id: row.get("id"),
        review_stars: row.get("review_stars"),
        review_text: row.get("review_text"),
        recipe_id: row.get("recipe_id"),
        created_by: row.get("created_by"),
        owner: row.get("owner"),
        created_at: row.get("created_at_ms"),
        updated_at: row.get("updated_at_ms"),
    }
}

#[async_trait]
impl RecordStore for Review {
    const TABLE: &'static str = "reviews";

    async fn list(pool: &PgPool, filter: &ReviewFilter) -> Result<Vec<Self>, RecordError> {
        let sql = format!(
            "SELECT {} FROM reviews WHERE ($1::uuid IS NULL OR recipe_id = $1) ORDER BY created_at DESC, id",
            select_columns(COLUMNS)
        );
        let rows = sqlx::query(&sql)
            .bind(filter.recipe_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().map(review_from_row).collect())
    }

    async fn get(pool: &PgPool, id: Uuid) -> Result<Self, RecordError> {
        let sql = format!("SELECT {} FROM reviews WHERE id = $1", select_columns(COLUMNS));
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Self>(id))?;
        Ok(review_from_row(&row))
    }

    async fn create(pool: &PgPool, draft: ReviewDraft) -> Result<Self, RecordError> {
        let recipe_id = draft.recipe_id.ok_or(RecordError::MissingField("recipeId"))?;
        let sql = format!(
            r"INSERT INTO reviews (review_stars, review_text, recipe_id, created_by, owner)
              VALUES ($1, $2, $3, $4, $5)
              RETURNING {}",
            select_columns(COLUMNS)
        );
        let row = sqlx::query(&sql)
            .bind(draft.review_stars)
            .bind(draft.review_text.unwrap_or_default())
            .bind(recipe_id)
            .bind(draft.created_by.unwrap_or_default())
            .bind(draft.owner.unwrap_or_default())
            .fetch_one(pool)
            .await?;
        Ok(review_from_row(&row))
    }

    async fn update(pool: &PgPool, id: Uuid, draft: ReviewDraft) -> Result<Self, RecordError> {
        let sql = format!(
            r"UPDATE reviews SET
                  review_stars = COALESCE($2, review_stars),
                  review_text = COALESCE($3, review_text),
                  recipe_id = COALESCE($4, recipe_id),
                  created_by = COALESCE($5, created_by),
                  owner = COALESCE($6, owner),
                  updated_at = now()
              WHERE id = $1
              RETURNING {}",
            select_columns(COLUMNS)
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(draft.review_stars)
            .bind(draft.review_text)
            .bind(draft.recipe_id)
            .bind(draft.created_by)
            .bind(draft.owner)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Self>(id))?;
        Ok(review_from_row(&row))
    }
}
