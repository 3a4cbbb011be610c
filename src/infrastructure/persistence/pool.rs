//! PostgreSQL connection pool and migrations.

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Opens a pool against `url` sized by `config`.
///
/// The pool holds at most `pool_size + max_overflow` connections and waits
/// `connect_timeout` seconds for a free one. SQL statements are logged under
/// the `sqlx::query` target only when `echo` is set.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the first connection fails.
pub async fn connect(config: &DatabaseConfig, url: &str) -> Result<PgPool> {
    let mut options = PgConnectOptions::from_str(url).context("Invalid database URL")?;
    if !config.echo {
        options = options.disable_statement_logging();
    }

    PgPoolOptions::new()
        .max_connections(config.max_connections())
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect_with(options)
        .await
        .context("Failed to connect to database")
}

/// Applies the embedded `migrations/` to the database at `config.migration_url()`.
///
/// # Errors
///
/// Returns an error if the connection or any migration fails.
pub async fn migrate(config: &DatabaseConfig) -> Result<()> {
    let pool = connect(config, &config.migration_url()?).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    tracing::info!("Migrations applied");

    Ok(())
}
