mod common;

use std::sync::Arc;

use member_registry::{
    MemberRepository, NewMember, PersistenceError, SqliteUnitOfWork, UnitOfWork, UnitOfWorkSession,
};

use common::{setup_database, TrackingObserver};

#[tokio::test]
async fn test_commit_functionality() {
    let pool = setup_database().await;
    let uow = SqliteUnitOfWork::new(Arc::new(pool.clone()));

    let session = uow.begin().await.expect("Failed to begin transaction");
    let repository = MemberRepository::new(session.executor().clone());

    let observer = TrackingObserver::new();
    session.register_transaction_aware(observer.clone());

    let member = NewMember::parse("alice").expect("Failed to parse member");
    let saved = repository
        .insert(&member)
        .await
        .expect("Failed to insert member");
    assert!(saved.id > 0, "Insert should assign a generated id");

    // Visible within the transaction before commit
    let found = repository
        .find_by_id(saved.id)
        .await
        .expect("Failed to find member")
        .expect("Member not found in transaction");
    assert_eq!(found.name, "alice");

    session.commit().await.expect("Failed to commit transaction");

    assert!(observer.is_committed(), "Observer should see the commit");
    assert!(!observer.is_rolled_back(), "Observer should not see a rollback");

    // Durable in a fresh session after commit
    let verify_session = uow.begin().await.expect("Failed to begin verify transaction");
    let verify_repository = MemberRepository::new(verify_session.executor().clone());

    let persisted = verify_repository
        .find_by_id(saved.id)
        .await
        .expect("Failed to find persisted member")
        .expect("Persisted member not found");
    assert_eq!(persisted, saved);

    verify_session
        .commit()
        .await
        .expect("Failed to commit verify transaction");

    pool.close().await;
}

#[tokio::test]
async fn test_rollback_functionality() {
    let pool = setup_database().await;
    let uow = SqliteUnitOfWork::new(Arc::new(pool.clone()));

    let session = uow.begin().await.expect("Failed to begin transaction");
    let repository = MemberRepository::new(session.executor().clone());

    let observer = TrackingObserver::new();
    session.register_transaction_aware(observer.clone());

    let member = NewMember::parse("bob").expect("Failed to parse member");
    let saved = repository
        .insert(&member)
        .await
        .expect("Failed to insert member");

    let found = repository
        .find_by_id(saved.id)
        .await
        .expect("Failed to find member");
    assert!(found.is_some(), "Member should exist in transaction");

    session
        .rollback()
        .await
        .expect("Failed to rollback transaction");

    assert!(!observer.is_committed(), "Observer should not see a commit");
    assert!(observer.is_rolled_back(), "Observer should see the rollback");

    // Nothing durable after rollback
    let verify_session = uow.begin().await.expect("Failed to begin verify transaction");
    let verify_repository = MemberRepository::new(verify_session.executor().clone());

    let not_found = verify_repository
        .find_by_id(saved.id)
        .await
        .expect("Failed to query member");
    assert!(not_found.is_none(), "Member should not exist after rollback");

    let count = verify_repository.count().await.expect("Failed to count members");
    assert_eq!(count, 0, "Member count should be unchanged");

    verify_session
        .commit()
        .await
        .expect("Failed to commit verify transaction");

    pool.close().await;
}

#[tokio::test]
async fn test_multiple_transactions_isolation() {
    let pool = setup_database().await;
    let uow = SqliteUnitOfWork::new(Arc::new(pool.clone()));

    // Transaction 1: create and commit a member
    let session1 = uow.begin().await.expect("Failed to begin transaction 1");
    let repository1 = MemberRepository::new(session1.executor().clone());

    let member1 = NewMember::parse("carol").expect("Failed to parse member1");
    let saved1 = repository1
        .insert(&member1)
        .await
        .expect("Failed to insert member1");
    session1.commit().await.expect("Failed to commit transaction 1");

    // Transaction 2: create but roll back another member
    let session2 = uow.begin().await.expect("Failed to begin transaction 2");
    let repository2 = MemberRepository::new(session2.executor().clone());

    let member2 = NewMember::parse("dave").expect("Failed to parse member2");
    let saved2 = repository2
        .insert(&member2)
        .await
        .expect("Failed to insert member2");
    session2
        .rollback()
        .await
        .expect("Failed to rollback transaction 2");

    // Only the committed member survives
    let verify_session = uow.begin().await.expect("Failed to begin verify transaction");
    let verify_repository = MemberRepository::new(verify_session.executor().clone());

    let found1 = verify_repository
        .find_by_id(saved1.id)
        .await
        .expect("Failed to find member1")
        .expect("Member1 should exist");
    assert_eq!(found1.name, "carol");

    let not_found2 = verify_repository
        .find_by_id(saved2.id)
        .await
        .expect("Failed to query member2");
    assert!(not_found2.is_none(), "Member2 should not exist after rollback");

    verify_session
        .commit()
        .await
        .expect("Failed to commit verify transaction");

    pool.close().await;
}

#[tokio::test]
async fn test_executor_closed_after_commit() {
    let pool = setup_database().await;
    let uow = SqliteUnitOfWork::new(Arc::new(pool.clone()));

    let session = uow.begin().await.expect("Failed to begin transaction");
    let repository = MemberRepository::new(session.executor().clone());

    let member = NewMember::parse("erin").expect("Failed to parse member");
    repository
        .insert(&member)
        .await
        .expect("Failed to insert member");

    session.commit().await.expect("Failed to commit transaction");

    // The session resolved; its executor must refuse further work
    let result = repository.count().await;
    assert!(
        matches!(result, Err(PersistenceError::SessionClosed)),
        "Executor use after commit should fail with SessionClosed"
    );

    pool.close().await;
}
