//! Database connectivity

pub mod mysql;

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use courier_shared::config::DatabaseConfig;

/// Builds the MySQL connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect(&config.url)
        .await?;

    info!(
        "Database pool ready (max {} connections)",
        config.max_connections
    );
    Ok(pool)
}
