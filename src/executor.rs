use sqlx::{Sqlite, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{PersistenceError, PersistenceResult};

/// Executor wraps the live database transaction for use by repositories.
///
/// The transaction is shared behind an async mutex so every repository created
/// within one unit of work stages its writes on the same transaction. Once the
/// session commits or rolls back the slot is emptied and any further use fails
/// with [`PersistenceError::SessionClosed`].
#[derive(Clone, Debug)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Transaction<'static, Sqlite>>>>,
}

impl Executor {
    /// Creates a new Executor from a SQLite transaction.
    pub fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Takes ownership of the transaction, leaving None in its place.
    /// Only called when committing or rolling back; taking twice is an error.
    pub(crate) async fn take_transaction(
        &self,
    ) -> PersistenceResult<Transaction<'static, Sqlite>> {
        self.tx
            .lock()
            .await
            .take()
            .ok_or(PersistenceError::SessionClosed)
    }
}
