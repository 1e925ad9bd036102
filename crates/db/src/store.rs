//! Storage seams used by the HTTP layer.
//!
//! [`UserStore`] and [`SessionStore`] describe the handful of document
//! operations the service performs. [`PgStore`] implements them on top of the
//! repositories; [`crate::MemoryStore`] implements them in-process for
//! development and tests.

use async_trait::async_trait;
use vidnotes_core::library::VideoLibrary;
use vidnotes_core::types::DbId;

use crate::models::session::{CreateSession, UserSession};
use crate::models::user::{CreateUser, User};
use crate::repositories::{SessionRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("A user with email {0} already exists")]
    DuplicateEmail(String),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Return the user with `email`, creating a password-less one if absent.
    async fn find_or_create_user(&self, email: &str) -> Result<User, StoreError>;

    /// Write the whole library if the user is still at `expected_version`.
    ///
    /// `Ok(None)` means the write lost a race (or the user vanished); the
    /// caller should reload and retry.
    async fn save_library(
        &self,
        id: DbId,
        expected_version: i64,
        library: &VideoLibrary,
    ) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, input: &CreateSession) -> Result<UserSession, StoreError>;

    /// Find a session that is neither revoked nor expired.
    async fn find_active_session(
        &self,
        session_key: &str,
    ) -> Result<Option<UserSession>, StoreError>;

    /// Returns `true` if an active session was revoked.
    async fn revoke_session(&self, session_key: &str) -> Result<bool, StoreError>;

    /// Delete expired or revoked sessions, returning how many were removed.
    async fn cleanup_sessions(&self) -> Result<u64, StoreError>;
}

/// Everything the API needs from persistence.
#[async_trait]
pub trait Store: UserStore + SessionStore {
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// [`Store`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION))
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, input).await.map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateEmail(input.email.clone())
            } else {
                StoreError::Database(e)
            }
        })
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn find_or_create_user(&self, email: &str) -> Result<User, StoreError> {
        Ok(UserRepo::find_or_create_by_email(&self.pool, email).await?)
    }

    async fn save_library(
        &self,
        id: DbId,
        expected_version: i64,
        library: &VideoLibrary,
    ) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::save_library(&self.pool, id, expected_version, library).await?)
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn create_session(&self, input: &CreateSession) -> Result<UserSession, StoreError> {
        Ok(SessionRepo::create(&self.pool, input).await?)
    }

    async fn find_active_session(
        &self,
        session_key: &str,
    ) -> Result<Option<UserSession>, StoreError> {
        Ok(SessionRepo::find_active(&self.pool, session_key).await?)
    }

    async fn revoke_session(&self, session_key: &str) -> Result<bool, StoreError> {
        Ok(SessionRepo::revoke(&self.pool, session_key).await?)
    }

    async fn cleanup_sessions(&self) -> Result<u64, StoreError> {
        Ok(SessionRepo::cleanup_expired(&self.pool).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
