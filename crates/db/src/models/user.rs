//! User document model and DTOs.

use sqlx::types::Json;
use sqlx::FromRow;
use vidnotes_core::library::{AnnotationMap, TitleMap, VideoLibrary};
use vidnotes_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to API responses directly.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    /// Argon2id PHC string; empty for users that only sign in through OAuth.
    pub password_hash: String,
    pub annotations: Json<AnnotationMap>,
    pub video_titles: Json<TitleMap>,
    /// Incremented on every library write; used for optimistic concurrency.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Copy the annotation and title maps into a mutable library.
    pub fn library(&self) -> VideoLibrary {
        VideoLibrary::new(self.annotations.0.clone(), self.video_titles.0.clone())
    }

    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    /// Empty for OAuth-only users.
    pub password_hash: String,
}
