use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;

use crate::{Executor, PersistenceResult, TransactionAware};

/// Unit of Work pattern for managing database transactions.
///
/// The UnitOfWork manages the lifecycle of database transactions and provides
/// a factory method to create new transaction sessions.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Session: UnitOfWorkSession;

    /// Begin a new transaction session.
    async fn begin(&self) -> PersistenceResult<Self::Session>;
}

/// Represents a single database transaction session.
///
/// Writes staged through the session's executor are provisional until
/// [`commit`](UnitOfWorkSession::commit) makes them durable;
/// [`rollback`](UnitOfWorkSession::rollback) discards them. Both consume the
/// session, so a transaction resolves exactly once. Dropping an unresolved
/// session rolls the transaction back.
#[async_trait]
pub trait UnitOfWorkSession: Send + Sync {
    /// Get the executor for this session (provides access to the transaction).
    fn executor(&self) -> &Executor;

    /// Register a component that needs to be notified of transaction events.
    fn register_transaction_aware(&self, observer: Arc<dyn TransactionAware>);

    /// Commit the transaction and notify all registered observers.
    async fn commit(self) -> PersistenceResult<()>;

    /// Rollback the transaction and notify all registered observers.
    async fn rollback(self) -> PersistenceResult<()>;
}

/// Default implementation of UnitOfWork for SQLite.
pub struct SqliteUnitOfWork {
    pool: Arc<SqlitePool>,
}

impl SqliteUnitOfWork {
    /// Create a new SqliteUnitOfWork with the given connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    type Session = SqliteUnitOfWorkSession;

    async fn begin(&self) -> PersistenceResult<Self::Session> {
        let tx = self.pool.begin().await?;
        Ok(SqliteUnitOfWorkSession::new(tx))
    }
}

/// Default implementation of UnitOfWorkSession for SQLite.
pub struct SqliteUnitOfWorkSession {
    executor: Executor,
    observers: Arc<RwLock<Vec<Arc<dyn TransactionAware>>>>,
}

impl SqliteUnitOfWorkSession {
    /// Create a new session from a SQLite transaction.
    pub fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self {
            executor: Executor::new(tx),
            observers: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl UnitOfWorkSession for SqliteUnitOfWorkSession {
    fn executor(&self) -> &Executor {
        &self.executor
    }

    fn register_transaction_aware(&self, observer: Arc<dyn TransactionAware>) {
        self.observers.write().push(observer);
    }

    async fn commit(self) -> PersistenceResult<()> {
        let tx = self.executor.take_transaction().await?;
        tx.commit().await?;
        tracing::debug!("transaction committed");

        // Notify observers after successful commit
        let observers = self.observers.read().clone();
        for observer in observers.iter() {
            observer.on_commit().await?;
        }
        Ok(())
    }

    async fn rollback(self) -> PersistenceResult<()> {
        let tx = self.executor.take_transaction().await?;
        tx.rollback().await?;
        tracing::debug!("transaction rolled back");

        // Notify observers after rollback
        let observers = self.observers.read().clone();
        for observer in observers.iter() {
            observer.on_rollback().await?;
        }
        Ok(())
    }
}
