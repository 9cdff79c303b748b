//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the HTTP API (auth, generated record CRUD, object
//! storage, schema introspection) and stitches it with Leptos SSR
//! rendering under a single Axum router. Compiled client assets are served
//! from `/pkg`.

pub mod auth;
pub mod records;
pub mod storage;

use std::path::PathBuf;

use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use schema::{DataSchema, Recipe, Review, SavedRecipe, StoragePolicy, User};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::records::RecordStore;
use crate::state::AppState;

/// Collection and item routes for one record type.
fn record_routes<R: RecordStore>() -> Router<AppState> {
    let collection = R::MODEL.collection();
    Router::new()
        .route(&format!("/api/{collection}"), get(records::list::<R>).post(records::create::<R>))
        .route(
            &format!("/api/{collection}/{{id}}"),
            get(records::get::<R>)
                .patch(records::update::<R>)
                .delete(records::delete::<R>),
        )
}

/// The JSON API, without the SSR frontend.
pub(crate) fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let storage_routes = Router::new()
        .route(
            "/api/storage/{*key}",
            get(storage::get_object)
                .put(storage::put_object)
                .delete(storage::delete_object),
        )
        .layer(DefaultBodyLimit::max(state.max_upload_bytes));

    Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/email/request-code", post(auth::request_email_code))
        .route("/api/auth/email/verify-code", post(auth::verify_email_code))
        .route("/api/schema", get(describe_schema))
        .merge(record_routes::<User>())
        .merge(record_routes::<Recipe>())
        .merge(record_routes::<SavedRecipe>())
        .merge(record_routes::<Review>())
        .merge(storage_routes)
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Leptos SSR frontend merged with the API.
///
/// # Errors
///
/// Returns an error if the Leptos configuration (`LEPTOS_*` environment
/// variables) cannot be loaded.
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

#[derive(Serialize)]
struct SchemaDescription {
    data: DataSchema,
    storage: StoragePolicy,
}

/// `GET /api/schema` — declared models, authorization rules, and storage policy.
async fn describe_schema(State(state): State<AppState>) -> Json<SchemaDescription> {
    Json(SchemaDescription { data: (*state.schema).clone(), storage: (*state.storage_policy).clone() })
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
