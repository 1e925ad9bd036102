//! Repository for the `users` table.

use sqlx::types::Json;
use sqlx::PgPool;
use vidnotes_core::library::VideoLibrary;
use vidnotes_core::types::DbId;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, email, password_hash, annotations, video_titles, version, \
                        created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with an empty library, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by (already normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Return the user with `email`, inserting a password-less row first if
    /// none exists. Concurrent callers converge on the same row.
    pub async fn find_or_create_by_email(pool: &PgPool, email: &str) -> Result<User, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO users (email, password_hash)
             VALUES ($1, '')
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(email)
        .execute(pool)
        .await?;
        if inserted.rows_affected() == 1 {
            tracing::debug!("Inserted password-less user on first sign-in");
        }

        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Replace both library maps in a single statement, provided the row is
    /// still at `expected_version`.
    ///
    /// Returns `None` if the row does not exist or was written concurrently.
    pub async fn save_library(
        pool: &PgPool,
        id: DbId,
        expected_version: i64,
        library: &VideoLibrary,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                annotations = $3,
                video_titles = $4,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(Json(&library.annotations))
            .bind(Json(&library.titles))
            .fetch_optional(pool)
            .await
    }
}
