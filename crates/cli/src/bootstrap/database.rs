use guardian_domain::config::DatabaseConfig;
use guardian_infrastructure::database::{create_read_pool, create_write_pool};
use sqlx::SqlitePool;
use tracing::{error, info};

/// Brings up the write pool (migrations run here) and the read pool used by
/// the HTTP control surface. SPEC_FULL.md §10.5.
pub async fn init_database(database_url: &str, cfg: &DatabaseConfig) -> anyhow::Result<(SqlitePool, SqlitePool)> {
    info!(database_url, "initializing database");

    let write_pool = create_write_pool(database_url, cfg).await.map_err(|e| {
        error!(error = %e, "failed to initialize write pool");
        anyhow::anyhow!(e)
    })?;

    let read_pool = create_read_pool(database_url, cfg).await.map_err(|e| {
        error!(error = %e, "failed to initialize read pool");
        anyhow::anyhow!(e)
    })?;

    info!(
        write_pool_max = cfg.write_pool_max_connections,
        read_pool_max = cfg.read_pool_max_connections,
        "database initialized"
    );

    Ok((write_pool, read_pool))
}
