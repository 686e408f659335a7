use sqlx::Row;

use crate::{Executor, Member, NewMember, PersistenceError, PersistenceResult};

/// Repository staging member writes on a unit-of-work session.
///
/// All operations run on the session's live transaction, so staged rows are
/// visible to subsequent lookups within the same session but only become
/// durable on commit.
pub struct MemberRepository {
    executor: Executor,
}

impl MemberRepository {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Stage a member for insertion and return it with its generated id.
    #[tracing::instrument(name = "Inserting member", skip(self, member), fields(name = member.name()))]
    pub async fn insert(&self, member: &NewMember) -> PersistenceResult<Member> {
        let mut tx_guard = self.executor.tx.lock().await;
        let tx = tx_guard.as_mut().ok_or(PersistenceError::SessionClosed)?;
        let row = sqlx::query("INSERT INTO members (name) VALUES (?1) RETURNING id")
            .bind(member.name())
            .fetch_one(&mut **tx)
            .await?;

        Ok(Member {
            id: row.get("id"),
            name: member.name().to_string(),
        })
    }

    #[tracing::instrument(name = "Finding member by id", skip(self))]
    pub async fn find_by_id(&self, id: i64) -> PersistenceResult<Option<Member>> {
        let mut tx_guard = self.executor.tx.lock().await;
        let tx = tx_guard.as_mut().ok_or(PersistenceError::SessionClosed)?;
        let row = sqlx::query("SELECT id, name FROM members WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(row.map(|r| Member {
            id: r.get("id"),
            name: r.get("name"),
        }))
    }

    #[tracing::instrument(name = "Finding members by name", skip(self))]
    pub async fn find_by_name(&self, name: &str) -> PersistenceResult<Vec<Member>> {
        let mut tx_guard = self.executor.tx.lock().await;
        let tx = tx_guard.as_mut().ok_or(PersistenceError::SessionClosed)?;
        let rows = sqlx::query("SELECT id, name FROM members WHERE name = ?1 ORDER BY id")
            .bind(name)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows
            .iter()
            .map(|r| Member {
                id: r.get("id"),
                name: r.get("name"),
            })
            .collect())
    }

    pub async fn count(&self) -> PersistenceResult<i64> {
        let mut tx_guard = self.executor.tx.lock().await;
        let tx = tx_guard.as_mut().ok_or(PersistenceError::SessionClosed)?;
        let row = sqlx::query("SELECT COUNT(*) as count FROM members")
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.get("count"))
    }
}
