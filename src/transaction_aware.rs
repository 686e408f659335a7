use async_trait::async_trait;

use crate::PersistenceResult;

/// Trait for components that need to be notified of transaction lifecycle events.
///
/// Components implementing this trait can be registered with a UnitOfWorkSession
/// to receive callbacks once the transaction resolves. Repositories use this to
/// finalize pending work after a commit or to discard in-memory state after a
/// rollback.
#[async_trait]
pub trait TransactionAware: Send + Sync {
    /// Called after a successful transaction commit.
    async fn on_commit(&self) -> PersistenceResult<()>;

    /// Called after a transaction rollback.
    async fn on_rollback(&self) -> PersistenceResult<()>;
}
