//! Repository for the `user_sessions` table.
//!
//! A row exists per login. Logout flips `is_revoked`; the cleanup job
//! deletes rows that can no longer authenticate anyone.

use sqlx::PgPool;

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str = "id, user_id, session_key, expires_at, is_revoked, created_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Record a new login.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, session_key, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.session_key)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Look up the session named by a cookie, if it can still authenticate.
    pub async fn find_active(
        pool: &PgPool,
        session_key: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE session_key = $1 AND NOT is_revoked AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(session_key)
            .fetch_optional(pool)
            .await
    }

    /// Mark a session as logged out. `false` if it was unknown or already revoked.
    pub async fn revoke(pool: &PgPool, session_key: &str) -> Result<bool, sqlx::Error> {
        let revoked = sqlx::query(
            "UPDATE user_sessions SET is_revoked = TRUE
             WHERE session_key = $1 AND NOT is_revoked",
        )
        .bind(session_key)
        .execute(pool)
        .await?
        .rows_affected();
        Ok(revoked == 1)
    }

    /// Delete every session that is expired or logged out.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        Ok(
            sqlx::query("DELETE FROM user_sessions WHERE is_revoked OR expires_at <= NOW()")
                .execute(pool)
                .await?
                .rows_affected(),
        )
    }
}
