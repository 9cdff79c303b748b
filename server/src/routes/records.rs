//! Generic REST handlers for declared record types.
//!
//! DESIGN
//! ======
//! One set of handlers serves every model through [`RecordStore`]. Each
//! handler resolves the caller, asks the data schema whether that class of
//! principal may perform the operation, and only then touches the store.
//!
//! | Method   | Path                      | Operation |
//! |----------|---------------------------|-----------|
//! | `GET`    | `/api/{collection}`       | read      |
//! | `POST`   | `/api/{collection}`       | create    |
//! | `GET`    | `/api/{collection}/{id}`  | read      |
//! | `PATCH`  | `/api/{collection}/{id}`  | update    |
//! | `DELETE` | `/api/{collection}/{id}`  | delete    |

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use schema::{AccessError, Operation};
use uuid::Uuid;

use super::auth::Caller;
use crate::services::records::{RecordError, RecordStore};
use crate::state::AppState;

fn authorize<R: RecordStore>(state: &AppState, caller: &Caller, operation: Operation) -> Result<(), StatusCode> {
    state
        .schema
        .authorize(R::MODEL, caller.kind(), operation)
        .map_err(access_error_to_status)
}

/// `GET /api/{collection}` — list records matching the query filter.
pub async fn list<R: RecordStore>(
    State(state): State<AppState>,
    caller: Caller,
    Query(filter): Query<R::Filter>,
) -> Result<Json<Vec<R>>, StatusCode> {
    authorize::<R>(&state, &caller, Operation::Read)?;
    let records = R::list(&state.pool, &filter).await.map_err(record_error_to_status)?;
    Ok(Json(records))
}

/// `POST /api/{collection}` — create a record.
pub async fn create<R: RecordStore>(
    State(state): State<AppState>,
    caller: Caller,
    Json(draft): Json<R::Draft>,
) -> Result<(StatusCode, Json<R>), StatusCode> {
    authorize::<R>(&state, &caller, Operation::Create)?;
    let record = R::create(&state.pool, draft).await.map_err(record_error_to_status)?;
    tracing::info!(model = R::MODEL.name(), id = %record.id(), "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/{collection}/{id}` — fetch one record.
pub async fn get<R: RecordStore>(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<R>, StatusCode> {
    authorize::<R>(&state, &caller, Operation::Read)?;
    let record = R::get(&state.pool, id).await.map_err(record_error_to_status)?;
    Ok(Json(record))
}

/// `PATCH /api/{collection}/{id}` — merge fields into a record.
pub async fn update<R: RecordStore>(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(draft): Json<R::Draft>,
) -> Result<Json<R>, StatusCode> {
    authorize::<R>(&state, &caller, Operation::Update)?;
    let record = R::update(&state.pool, id, draft).await.map_err(record_error_to_status)?;
    Ok(Json(record))
}

/// `DELETE /api/{collection}/{id}` — delete a record.
pub async fn delete<R: RecordStore>(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    authorize::<R>(&state, &caller, Operation::Delete)?;
    R::delete(&state.pool, id).await.map_err(record_error_to_status)?;
    tracing::info!(model = R::MODEL.name(), %id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn access_error_to_status(err: AccessError) -> StatusCode {
    match err {
        AccessError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
        AccessError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AccessError::UndeclaredModel(_) => StatusCode::NOT_FOUND,
    }
}

pub(crate) fn record_error_to_status(err: RecordError) -> StatusCode {
    match err {
        RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
        RecordError::MissingField(_) | RecordError::DanglingReference => StatusCode::UNPROCESSABLE_ENTITY,
        RecordError::Conflict => StatusCode::CONFLICT,
        RecordError::Database(e) => {
            tracing::error!(error = %e, "record store database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
