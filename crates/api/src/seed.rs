//! Explicit creation of password users (the `vidnotes-seed` binary).

use vidnotes_core::validation::{normalize_email, validate_password_strength, MIN_PASSWORD_LENGTH};
use vidnotes_db::models::user::{CreateUser, User};
use vidnotes_db::{Store, StoreError, UserStore};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Result of [`seed_user`].
#[derive(Debug)]
pub enum SeedOutcome {
    Created(User),
    /// A user with this email already existed and was left untouched.
    AlreadyExists(User),
}

/// Create a password user unless one with the same email exists.
pub async fn seed_user(store: &dyn Store, email: &str, password: &str) -> AppResult<SeedOutcome> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(AppError::BadRequest("email empty".into()));
    }
    validate_password_strength(password, MIN_PASSWORD_LENGTH)?;

    if let Some(existing) = store.find_user_by_email(&email).await? {
        return Ok(SeedOutcome::AlreadyExists(existing));
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    match store
        .create_user(&CreateUser {
            email: email.clone(),
            password_hash,
        })
        .await
    {
        Ok(user) => Ok(SeedOutcome::Created(user)),
        // Lost a race with a concurrent seed or OAuth signup.
        Err(StoreError::DuplicateEmail(_)) => store
            .find_user_by_email(&email)
            .await?
            .map(SeedOutcome::AlreadyExists)
            .ok_or_else(|| AppError::InternalError("Seeded user vanished".into())),
        Err(e) => Err(e.into()),
    }
}
