//! `User` record persistence.
//!
//! The same `users` rows back login sessions. A first email sign-in
//! creates the row through [`ensure_for_email`]; afterwards it is an
//! ordinary record.

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;

use async_trait::async_trait;
use schema::{User, UserDraft, UserFilter};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::records::{RecordError, RecordStore, not_found, select_columns};

const COLUMNS: &[&str] = &["id", "username", "email"];

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        created_at: row.get("created_at_ms"),
        updated_at: row.get("updated_at_ms"),
    }
}

#[async_trait]
impl RecordStore for User {
    const TABLE: &'static str = "users";

    async fn list(pool: &PgPool, filter: &UserFilter) -> Result<Vec<Self>, RecordError> {
        let sql = format!(
            "SELECT {} FROM users WHERE ($1::text IS NULL OR email = lower($1)) ORDER BY created_at DESC, id",
            select_columns(COLUMNS)
        );
        let rows = sqlx::query(&sql)
            .bind(filter.email.as_deref())
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn get(pool: &PgPool, id: Uuid) -> Result<Self, RecordError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", select_columns(COLUMNS));
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Self>(id))?;
        Ok(user_from_row(&row))
    }

    async fn create(pool: &PgPool, draft: UserDraft) -> Result<Self, RecordError> {
        let sql = format!(
            "INSERT INTO users (username, email) VALUES ($1, lower($2)) RETURNING {}",
            select_columns(COLUMNS)
        );
        let row = sqlx::query(&sql)
            .bind(draft.username.unwrap_or_default())
            .bind(draft.email.unwrap_or_default())
            .fetch_one(pool)
            .await?;
        Ok(user_from_row(&row))
    }

    async fn update(pool: &PgPool, id: Uuid, draft: UserDraft) -> Result<Self, RecordError> {
        let sql = format!(
            r"UPDATE users SET
                  username = COALESCE($2, username),
                  email = COALESCE(lower($3), email),
                  updated_at = now()
              WHERE id = $1
              RETURNING {}",
            select_columns(COLUMNS)
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(draft.username)
            .bind(draft.email)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Self>(id))?;
        Ok(user_from_row(&row))
    }
}

/// Default username for a new account: the local part of the address.
#[must_use]
pub fn username_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("cook")
        .to_owned()
}

/// Create the user for a normalized `email` unless one exists. An existing
/// user keeps its username.
pub async fn ensure_for_email(pool: &PgPool, email: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"INSERT INTO users (email, username)
          VALUES ($1, $2)
          ON CONFLICT (email) WHERE email <> '' DO NOTHING",
    )
    .bind(email)
    .bind(username_from_email(email))
    .execute(pool)
    .await?;
    Ok(())
}

/// Id of the user registered under a normalized `email`.
pub async fn id_for_email(pool: &PgPool, email: &str) -> Result<Option<Uuid>, sqlx::Error> {
    let row = sqlx::query("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| r.get("id")))
}
