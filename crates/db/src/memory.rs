//! In-process [`Store`] used when no `DATABASE_URL` is configured and by the
//! HTTP integration tests.
//!
//! Mirrors the PostgreSQL semantics that matter to callers: unique emails,
//! versioned library writes, and session expiry/revocation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;
use vidnotes_core::library::VideoLibrary;
use vidnotes_core::types::DbId;

use crate::models::session::{CreateSession, UserSession};
use crate::models::user::{CreateUser, User};
use crate::store::{SessionStore, Store, StoreError, UserStore};

#[derive(Default)]
struct MemoryState {
    users: HashMap<DbId, User>,
    next_user_id: DbId,
    sessions: HashMap<String, UserSession>,
    next_session_id: DbId,
}

impl MemoryState {
    fn insert_user(&mut self, email: &str, password_hash: &str) -> User {
        self.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: self.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            annotations: Json(Default::default()),
            video_titles: Json(Default::default()),
            version: 0,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }
}

/// Thread-safe via interior `RwLock`; wrap in `Arc` to share.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if state.user_by_email(&input.email).is_some() {
            return Err(StoreError::DuplicateEmail(input.email.clone()));
        }
        Ok(state.insert_user(&input.email, &input.password_hash))
    }

    async fn find_user_by_id(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.user_by_email(email).cloned())
    }

    async fn find_or_create_user(&self, email: &str) -> Result<User, StoreError> {
        let mut state = self.state.write().await;
        if let Some(user) = state.user_by_email(email) {
            return Ok(user.clone());
        }
        Ok(state.insert_user(email, ""))
    }

    async fn save_library(
        &self,
        id: DbId,
        expected_version: i64,
        library: &VideoLibrary,
    ) -> Result<Option<User>, StoreError> {
        let mut state = self.state.write().await;
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if user.version != expected_version {
            return Ok(None);
        }

        user.annotations = Json(library.annotations.clone());
        user.video_titles = Json(library.titles.clone());
        user.version += 1;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, input: &CreateSession) -> Result<UserSession, StoreError> {
        let mut state = self.state.write().await;
        state.next_session_id += 1;
        let session = UserSession {
            id: state.next_session_id,
            user_id: input.user_id,
            session_key: input.session_key.clone(),
            expires_at: input.expires_at,
            is_revoked: false,
            created_at: Utc::now(),
        };
        state
            .sessions
            .insert(session.session_key.clone(), session.clone());
        Ok(session)
    }

    async fn find_active_session(
        &self,
        session_key: &str,
    ) -> Result<Option<UserSession>, StoreError> {
        let now = Utc::now();
        Ok(self
            .state
            .read()
            .await
            .sessions
            .get(session_key)
            .filter(|s| s.is_active_at(now))
            .cloned())
    }

    async fn revoke_session(&self, session_key: &str) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.sessions.get_mut(session_key) {
            Some(session) if !session.is_revoked => {
                session.is_revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn cleanup_sessions(&self) -> Result<u64, StoreError> {
        let now = Utc::now();
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.is_active_at(now));
        Ok((before - state.sessions.len()) as u64)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use vidnotes_core::library::Annotation;

    use super::*;

    fn password_user(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store.create_user(&password_user("a@test.com")).await.unwrap();

        let err = store
            .create_user(&password_user("a@test.com"))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::DuplicateEmail(email) if email == "a@test.com");
    }

    #[tokio::test]
    async fn find_or_create_reuses_existing_user() {
        let store = MemoryStore::new();
        let first = store.find_or_create_user("o@test.com").await.unwrap();
        let second = store.find_or_create_user("o@test.com").await.unwrap();

        assert_eq!(first.id, second.id);
        assert!(!first.has_password());
    }

    #[tokio::test]
    async fn save_library_bumps_version() {
        let store = MemoryStore::new();
        let user = store.create_user(&password_user("v@test.com")).await.unwrap();

        let mut library = user.library();
        library.append("abc", Annotation::new("1", "x"), "T");

        let saved = store
            .save_library(user.id, user.version, &library)
            .await
            .unwrap()
            .expect("write at current version should succeed");
        assert_eq!(saved.version, user.version + 1);
        assert_eq!(saved.library(), library);
    }

    #[tokio::test]
    async fn save_library_with_stale_version_is_refused() {
        let store = MemoryStore::new();
        let user = store.create_user(&password_user("s@test.com")).await.unwrap();
        let library = user.library();

        store
            .save_library(user.id, user.version, &library)
            .await
            .unwrap()
            .unwrap();
        let stale = store
            .save_library(user.id, user.version, &library)
            .await
            .unwrap();
        assert!(stale.is_none());
    }

    #[tokio::test]
    async fn revoked_and_expired_sessions_are_inactive() {
        let store = MemoryStore::new();
        let live = CreateSession {
            user_id: 1,
            session_key: "live".into(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
        };
        let expired = CreateSession {
            user_id: 1,
            session_key: "expired".into(),
            expires_at: Utc::now() - chrono::Duration::hours(1),
        };
        store.create_session(&live).await.unwrap();
        store.create_session(&expired).await.unwrap();

        assert!(store.find_active_session("live").await.unwrap().is_some());
        assert!(store.find_active_session("expired").await.unwrap().is_none());

        assert!(store.revoke_session("live").await.unwrap());
        assert!(!store.revoke_session("live").await.unwrap());
        assert!(store.find_active_session("live").await.unwrap().is_none());

        assert_eq!(store.cleanup_sessions().await.unwrap(), 2);
    }
}
