//! Schema migrations against the configured PostgreSQL database

use anyhow::{Context, Result};

use leaguectl_core::LeagueConfig;
use leaguectl_server::db::{self, migrations};

pub async fn run_migrate(config: &LeagueConfig) -> Result<()> {
    let url = config
        .store
        .database_url
        .as_deref()
        .context("DATABASE_URL not set. Set via [store].database_url, DATABASE_URL env, or .env")?;

    let pool = db::create_pool_with_options(url, config.store.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Migration failed")?;

    tracing::info!("schema is up to date");
    Ok(())
}
