#![recursion_limit = "256"]

mod config;
mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use config::ServerConfig;
use services::storage::FsObjectStore;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env().expect("invalid server configuration");

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");

    if config.email.resend_api_key.is_none() {
        tracing::warn!("RESEND_API_KEY not set; access codes will not be emailed");
    }

    let objects = Arc::new(FsObjectStore::new(&config.storage_root));
    tracing::info!(root = %config.storage_root.display(), "object storage ready");

    let state = state::AppState::new(pool, objects, &config);

    let app = routes::leptos_app(state).expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "recipe app listening");
    axum::serve(listener, app).await.expect("server failed");
}
