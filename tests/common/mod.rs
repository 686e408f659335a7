use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::SqlitePool;
use std::sync::Arc;

use member_registry::{db, PersistenceConfig, PersistenceResult, TransactionAware};

/// Connect to a private in-memory database with the schema applied.
///
/// One connection per pool keeps every session of a test on the same
/// in-memory database.
pub async fn setup_database() -> SqlitePool {
    let config = PersistenceConfig {
        unit: "test".to_string(),
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };

    db::connect(&config)
        .await
        .expect("Failed to connect to database")
}

/// Transaction observer tracking which lifecycle callback fired.
pub struct TrackingObserver {
    committed: Arc<RwLock<bool>>,
    rolled_back: Arc<RwLock<bool>>,
}

impl TrackingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            committed: Arc::new(RwLock::new(false)),
            rolled_back: Arc::new(RwLock::new(false)),
        })
    }

    pub fn is_committed(&self) -> bool {
        *self.committed.read()
    }

    pub fn is_rolled_back(&self) -> bool {
        *self.rolled_back.read()
    }
}

#[async_trait]
impl TransactionAware for TrackingObserver {
    async fn on_commit(&self) -> PersistenceResult<()> {
        *self.committed.write() = true;
        Ok(())
    }

    async fn on_rollback(&self) -> PersistenceResult<()> {
        *self.rolled_back.write() = true;
        Ok(())
    }
}
