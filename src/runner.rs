use crate::{
    Member, MemberRepository, NewMember, PersistenceResult, UnitOfWork, UnitOfWorkSession,
};

/// Persist a batch of members atomically within a single unit of work.
///
/// Opens one session, stages every record for insertion, and commits. On any
/// staging failure the transaction is rolled back and the staging error is
/// returned, so no record of the batch becomes durable unless all do. The
/// returned members carry their generated identifiers, in input order.
#[tracing::instrument(name = "Persisting member batch", skip_all, fields(batch_size = members.len()))]
pub async fn persist_members<U>(uow: &U, members: &[NewMember]) -> PersistenceResult<Vec<Member>>
where
    U: UnitOfWork,
{
    let session = uow.begin().await?;
    let repository = MemberRepository::new(session.executor().clone());

    let mut persisted = Vec::with_capacity(members.len());
    for member in members {
        match repository.insert(member).await {
            Ok(saved) => persisted.push(saved),
            Err(err) => {
                tracing::error!(error = %err, "staging failed, rolling back");
                if let Err(rollback_err) = session.rollback().await {
                    tracing::error!(error = %rollback_err, "rollback failed");
                }
                return Err(err);
            }
        }
    }

    session.commit().await?;
    tracing::info!(count = persisted.len(), "member batch committed");
    Ok(persisted)
}
