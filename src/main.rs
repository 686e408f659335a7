use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use member_registry::{
    db, persist_members, NewMember, PersistenceConfig, PersistenceResult, SqliteUnitOfWork,
};

const PERSISTENCE_UNIT: &str = "hello";

#[tokio::main]
async fn main() -> PersistenceResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PersistenceConfig::resolve(PERSISTENCE_UNIT);
    tracing::info!(unit = %config.unit, url = %config.database_url, "resolved persistence unit");

    let pool = db::connect(&config).await?;
    let uow = SqliteUnitOfWork::new(Arc::new(pool.clone()));

    let members = vec![
        NewMember::parse("san-a")?,
        NewMember::parse("san-b")?,
        NewMember::parse("san-c")?,
    ];

    let outcome = persist_members(&uow, &members).await;
    pool.close().await;

    match outcome {
        Ok(saved) => {
            for member in &saved {
                tracing::info!(id = member.id, name = %member.name, "member persisted");
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "batch rolled back, nothing persisted");
            Err(err)
        }
    }
}
