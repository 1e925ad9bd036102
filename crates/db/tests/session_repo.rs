//! Integration tests for session persistence against a real PostgreSQL database.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use vidnotes_db::models::session::CreateSession;
use vidnotes_db::models::user::CreateUser;
use vidnotes_db::repositories::{SessionRepo, UserRepo};
use vidnotes_db::{PgStore, SessionStore};

async fn user_id(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: "maverick@gmail.com".to_string(),
            password_hash: String::new(),
        },
    )
    .await
    .unwrap()
    .id
}

fn session(user_id: i64, key: &str, ttl: Duration) -> CreateSession {
    CreateSession {
        user_id,
        session_key: key.to_string(),
        expires_at: Utc::now() + ttl,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_live_session_is_active(pool: PgPool) {
    let uid = user_id(&pool).await;
    let created = SessionRepo::create(&pool, &session(uid, "live", Duration::hours(1)))
        .await
        .unwrap();
    assert!(!created.is_revoked);

    let found = SessionRepo::find_active(&pool, "live").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.user_id, uid);

    assert!(SessionRepo::find_active(&pool, "unknown").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_session_is_not_active(pool: PgPool) {
    let uid = user_id(&pool).await;
    SessionRepo::create(&pool, &session(uid, "old", -Duration::minutes(1)))
        .await
        .unwrap();

    assert!(SessionRepo::find_active(&pool, "old").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revoke_deactivates_once(pool: PgPool) {
    let uid = user_id(&pool).await;
    SessionRepo::create(&pool, &session(uid, "k", Duration::hours(1)))
        .await
        .unwrap();

    assert!(SessionRepo::revoke(&pool, "k").await.unwrap());
    assert!(SessionRepo::find_active(&pool, "k").await.unwrap().is_none());

    // Already revoked, and unknown keys, report nothing done.
    assert!(!SessionRepo::revoke(&pool, "k").await.unwrap());
    assert!(!SessionRepo::revoke(&pool, "missing").await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cleanup_removes_expired_and_revoked_only(pool: PgPool) {
    let uid = user_id(&pool).await;
    let store = PgStore::new(pool.clone());
    store
        .create_session(&session(uid, "live", Duration::hours(1)))
        .await
        .unwrap();
    store
        .create_session(&session(uid, "expired", -Duration::hours(1)))
        .await
        .unwrap();
    store
        .create_session(&session(uid, "revoked", Duration::hours(1)))
        .await
        .unwrap();
    store.revoke_session("revoked").await.unwrap();

    assert_eq!(store.cleanup_sessions().await.unwrap(), 2);
    assert_eq!(store.cleanup_sessions().await.unwrap(), 0);

    let remaining: Vec<(String,)> = sqlx::query_as("SELECT session_key FROM user_sessions")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, vec![("live".to_string(),)]);
    assert!(store.find_active_session("live").await.unwrap().is_some());
}

/// Deleting a user takes its sessions with it.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sessions_cascade_with_user(pool: PgPool) {
    let uid = user_id(&pool).await;
    SessionRepo::create(&pool, &session(uid, "k", Duration::hours(1)))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(uid)
        .execute(&pool)
        .await
        .unwrap();

    assert!(SessionRepo::find_active(&pool, "k").await.unwrap().is_none());
}
