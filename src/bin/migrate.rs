//! One-shot schema migration: applies `db/init.sql` against the configured
//! database and exits. The schema is embedded at compile time, so no SQL
//! files are needed at runtime. Run before starting the server.
//!
//! Idempotent only as far as the DDL itself is (`CREATE TABLE IF NOT
//! EXISTS`); there is no migration ledger and no retry.

use anyhow::Context;
use sqlx::Executor;

use blog_api::{connect_db, init_tracing, DbConfig};

const SCHEMA: &str = include_str!("../../db/init.sql");

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();
    if let Err(error) = run().await {
        tracing::error!("Error running database migrations: {:#}", error);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = DbConfig::from_env()?;
    let pool = connect_db(&config).await?;
    tracing::info!("Running database migrations...");
    // The whole file goes over the simple-query protocol as one batch.
    pool.execute(SCHEMA)
        .await
        .context("Error applying schema")?;
    tracing::info!("Database migrations completed successfully");
    pool.close().await;
    Ok(())
}
