//! SQLite Member Registry
//!
//! This crate provides transaction handling primitives for persisting member
//! records in SQLite. It isolates transaction management (unit of work,
//! executor, transaction-aware observers) from the member repository, and
//! ships a runner that persists a batch of members atomically.

pub mod config;
pub mod db;
pub mod error;
pub mod executor;
pub mod member;
pub mod repository;
pub mod runner;
pub mod transaction_aware;
pub mod unit_of_work;

pub use config::PersistenceConfig;
pub use error::{PersistenceError, PersistenceResult};
pub use executor::Executor;
pub use member::{Member, NewMember};
pub use repository::MemberRepository;
pub use runner::persist_members;
pub use transaction_aware::TransactionAware;
pub use unit_of_work::{SqliteUnitOfWork, SqliteUnitOfWorkSession, UnitOfWork, UnitOfWorkSession};
