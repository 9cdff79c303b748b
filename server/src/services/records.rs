//! Persistence for declared record types: the generated CRUD surface.
//!
//! DESIGN
//! ======
//! Every model implements [`RecordStore`] once; HTTP handlers are generic
//! over it, so adding a model means one SQL module and one router line.
//! Update is a partial merge: absent draft fields keep their stored value
//! (`COALESCE($n, column)`). The store never checks who is calling; the
//! route layer asks the data schema first.

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;

use async_trait::async_trait;
use schema::{Model, Record};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{model:?} not found: {id}")]
    NotFound { model: Model, id: Uuid },
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("referenced record does not exist")]
    DanglingReference,
    #[error("conflicts with an existing record")]
    Conflict,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RecordError {
    fn from(err: sqlx::Error) -> Self {
        let code = err
            .as_database_error()
            .and_then(|db| db.code())
            .map(std::borrow::Cow::into_owned);
        match code.as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => Self::DanglingReference,
            Some(UNIQUE_VIOLATION) => Self::Conflict,
            _ => Self::Database(err),
        }
    }
}

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

/// SQL-backed CRUD for one record type.
#[async_trait]
pub trait RecordStore: Record {
    /// Backing table name.
    const TABLE: &'static str;

    /// List records matching `filter`, newest first.
    async fn list(pool: &PgPool, filter: &Self::Filter) -> Result<Vec<Self>, RecordError>;

    /// Fetch one record.
    async fn get(pool: &PgPool, id: Uuid) -> Result<Self, RecordError>;

    /// Insert a record built from `draft`; absent fields take column defaults.
    async fn create(pool: &PgPool, draft: Self::Draft) -> Result<Self, RecordError>;

    /// Merge `draft` into an existing record.
    async fn update(pool: &PgPool, id: Uuid, draft: Self::Draft) -> Result<Self, RecordError>;

    /// Delete one record.
    async fn delete(pool: &PgPool, id: Uuid) -> Result<(), RecordError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", Self::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        if result.rows_affected() == 0 {
            return Err(not_found::<Self>(id));
        }
        Ok(())
    }
}

pub(crate) fn not_found<R: Record>(id: Uuid) -> RecordError {
    RecordError::NotFound { model: R::MODEL, id }
}

/// Column list for a `SELECT`/`RETURNING` clause, with the standard
/// timestamp columns rendered as epoch milliseconds.
#[must_use]
pub(crate) fn select_columns(columns: &[&str]) -> String {
    let mut out = columns.join(", ");
    out.push_str(", ");
    out.push_str(&crate::db::epoch_ms("created_at"));
    out.push_str(" AS created_at_ms, ");
    out.push_str(&crate::db::epoch_ms("updated_at"));
    out.push_str(" AS updated_at_ms");
    out
}
