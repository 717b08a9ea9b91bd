//! Refresh token store tests against the real `refresh_tokens` table.

use chrono::{Duration, Utc};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use auth_service_lib::build_refresh_tokens;
use auth_service_lib::infra::Migrator;
use auth_service_lib::repository::{
    RefreshTokenRepository, RefreshTokenTable, UserRepository, UserStore,
};
use common::AppError;
use domain::{RefreshToken, TokenError, TokenStatus};

async fn setup() -> (DatabaseConnection, Uuid) {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let user = UserStore::new(db.clone())
        .create("walt@breakingbad.com".to_string(), "hash".to_string())
        .await
        .unwrap();
    (db, user.id)
}

#[tokio::test]
async fn test_issue_then_resolve() {
    let (db, user_id) = setup().await;
    let store = build_refresh_tokens(db);

    let token = store.issue(user_id, Duration::days(60)).await.unwrap();
    assert_eq!(store.resolve_user(&token.token).await.unwrap(), user_id);
}

#[tokio::test]
async fn test_issued_tokens_are_distinct() {
    let (db, user_id) = setup().await;
    let store = build_refresh_tokens(db);

    let a = store.issue(user_id, Duration::days(1)).await.unwrap();
    let b = store.issue(user_id, Duration::days(1)).await.unwrap();
    assert_ne!(a.token, b.token);
}

#[tokio::test]
async fn test_expired_token() {
    let (db, user_id) = setup().await;
    let store = build_refresh_tokens(db);

    let token = store.issue(user_id, Duration::seconds(-1)).await.unwrap();
    let err = store.resolve_user(&token.token).await.unwrap_err();
    assert!(matches!(err, AppError::Token(TokenError::Expired)));
}

#[tokio::test]
async fn test_revoked_token() {
    let (db, user_id) = setup().await;
    let store = build_refresh_tokens(db);

    let token = store.issue(user_id, Duration::days(1)).await.unwrap();
    store.revoke(&token.token).await.unwrap();

    let err = store.resolve_user(&token.token).await.unwrap_err();
    assert!(matches!(err, AppError::Token(TokenError::Revoked)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_revokes_both_succeed() {
    let (db, user_id) = setup().await;
    let store = build_refresh_tokens(db);
    let token = store.issue(user_id, Duration::days(1)).await.unwrap();

    let (a, b) = tokio::join!(store.revoke(&token.token), store.revoke(&token.token));
    assert!(a.is_ok());
    assert!(b.is_ok());

    let err = store.resolve_user(&token.token).await.unwrap_err();
    assert!(matches!(err, AppError::Token(TokenError::Revoked)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_revokes_on_separate_tasks() {
    let (db, user_id) = setup().await;
    let store = build_refresh_tokens(db);
    let token = store.issue(user_id, Duration::days(1)).await.unwrap().token;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            let token = token.clone();
            tokio::spawn(async move { store.revoke(&token).await })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let err = store.resolve_user(&token).await.unwrap_err();
    assert!(matches!(err, AppError::Token(TokenError::Revoked)));
}

#[tokio::test]
async fn test_second_revoke_keeps_first_timestamp() {
    let (db, user_id) = setup().await;
    let table = RefreshTokenTable::new(db);

    let token = table
        .insert(RefreshToken::new(
            "abc".to_string(),
            user_id,
            Utc::now() + Duration::days(1),
        ))
        .await
        .unwrap();

    let first = Utc::now() - Duration::minutes(5);
    assert_eq!(table.revoke(&token.token, first).await.unwrap(), 1);
    assert_eq!(table.revoke(&token.token, Utc::now()).await.unwrap(), 0);

    let stored = table.find("abc").await.unwrap().unwrap();
    let revoked_at = stored.revoked_at.unwrap();
    assert!((revoked_at - first).num_seconds().abs() < 1);
    assert_eq!(stored.status_at(Utc::now()), TokenStatus::Revoked);
}

#[tokio::test]
async fn test_revoke_unknown_token() {
    let (db, _) = setup().await;
    let store = build_refresh_tokens(db.clone());

    let err = store.revoke("nope").await.unwrap_err();
    assert!(matches!(err, AppError::Token(TokenError::NotFound)));
    assert_eq!(RefreshTokenTable::new(db).revoke("nope", Utc::now()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_token_value_is_rejected() {
    let (db, user_id) = setup().await;
    let table = RefreshTokenTable::new(db);
    let expires_at = Utc::now() + Duration::days(1);

    table
        .insert(RefreshToken::new("dup".to_string(), user_id, expires_at))
        .await
        .unwrap();
    let err = table
        .insert(RefreshToken::new("dup".to_string(), user_id, expires_at))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
}
