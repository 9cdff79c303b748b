//! Object storage routes: `GET|PUT|DELETE /api/storage/{*key}`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request is checked against the declared storage policy before the
//! backend sees the key. Guests may read recipe images; writes and deletes
//! need a session. Upload bodies are the raw object bytes.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use schema::{StorageAction, StorageDenied};

use super::auth::Caller;
use crate::services::storage::{ObjectStoreError, inline_image_type};
use crate::state::AppState;

fn check(state: &AppState, caller: &Caller, key: &str, action: StorageAction) -> Result<(), StatusCode> {
    state
        .storage_policy
        .check(key, caller.kind(), action)
        .map_err(storage_denied_to_status)
}

/// `GET /api/storage/{*key}` — download an object.
///
/// Raster images are served inline; anything else is an
/// `application/octet-stream` attachment. Responses always carry
/// `nosniff`.
pub async fn get_object(
    State(state): State<AppState>,
    caller: Caller,
    Path(key): Path<String>,
) -> Result<Response, StatusCode> {
    check(&state, &caller, &key, StorageAction::Read)?;
    let bytes = state.objects.get(&key).await.map_err(object_store_error_to_status)?;
    let response = match inline_image_type(&key) {
        Some(content_type) => (
            [(header::CONTENT_TYPE, content_type), (header::X_CONTENT_TYPE_OPTIONS, "nosniff")],
            bytes,
        )
            .into_response(),
        None => (
            [
                (header::CONTENT_TYPE, "application/octet-stream"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
                (header::CONTENT_DISPOSITION, "attachment"),
            ],
            bytes,
        )
            .into_response(),
    };
    Ok(response)
}

/// `PUT /api/storage/{*key}` — upload (or replace) an object.
pub async fn put_object(
    State(state): State<AppState>,
    caller: Caller,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<StatusCode, StatusCode> {
    check(&state, &caller, &key, StorageAction::Write)?;
    state.objects.put(&key, &body).await.map_err(object_store_error_to_status)?;
    tracing::info!(%key, bytes = body.len(), "object stored");
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/storage/{*key}` — remove an object; missing objects succeed.
pub async fn delete_object(
    State(state): State<AppState>,
    caller: Caller,
    Path(key): Path<String>,
) -> Result<StatusCode, StatusCode> {
    check(&state, &caller, &key, StorageAction::Delete)?;
    state.objects.delete(&key).await.map_err(object_store_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn storage_denied_to_status(err: StorageDenied) -> StatusCode {
    match err {
        StorageDenied::InvalidKey(_) => StatusCode::BAD_REQUEST,
        StorageDenied::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
        StorageDenied::Undeclared(_) | StorageDenied::Forbidden { .. } => StatusCode::FORBIDDEN,
    }
}

pub(crate) fn object_store_error_to_status(err: ObjectStoreError) -> StatusCode {
    match err {
        ObjectStoreError::NotFound(_) => StatusCode::NOT_FOUND,
        ObjectStoreError::Io(e) => {
            tracing::error!(error = %e, "object store io error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
