mod config;
mod data_formats;
mod db_helpers;
mod errors;
mod handlers;
mod models;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::get, Extension, Json, Router};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

pub use config::{Config, DbConfig};
use handlers::*;

pub type JsonResponse<T> = (StatusCode, Json<T>);

/// Initialise the global `tracing` subscriber. Respects `RUST_LOG`, falling
/// back to `info`. Call once, at the start of `main`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .init();
}

pub async fn connect_db(config: &DbConfig) -> Result<PgPool> {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database);
    let pool = PgPoolOptions::new()
        .connect_with(options)
        .await
        .context("Error connecting to PostgreSQL database")?;
    tracing::info!("Connected to PostgreSQL database");
    Ok(pool)
}

/// Serves the router until ctrl-c, then closes the pool.
pub async fn run_app(app: Router, address: SocketAddr, pool: PgPool) -> Result<()> {
    let app = app.layer(Extension(Arc::new(pool.clone())));
    tracing::info!("Server running on port {}", address.port());
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    pool.close().await;
    Ok(())
}

pub fn make_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/", get(root))
        .route("/api/articles", get(list_articles).post(create_article))
        .route(
            "/api/articles/:id",
            get(get_article).patch(update_article).delete(delete_article),
        )
        .layer(cors)
}
