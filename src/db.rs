use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

/// Connects to PostgreSQL and applies pending migrations.
pub async fn connect(config: &AppConfig, database_url: &str) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await
        .context("connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("run database migrations")?;
    tracing::info!("database migrations applied");

    Ok(db)
}
