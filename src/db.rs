use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::{PersistenceConfig, PersistenceResult};

/// Build a connection pool for the given persistence unit and bring the
/// schema up to date.
pub async fn connect(config: &PersistenceConfig) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS members (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
