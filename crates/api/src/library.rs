//! Versioned read-modify-write of a user's video library.
//!
//! Each mutation is applied to the library loaded at some `version` and
//! written back only if the stored document is still at that version. A
//! concurrent writer therefore forces a reload and reapply instead of being
//! silently overwritten.

use vidnotes_core::error::CoreError;
use vidnotes_core::library::VideoLibrary;
use vidnotes_db::models::user::User;
use vidnotes_db::{Store, UserStore};

use crate::error::{AppError, AppResult};

/// Attempts per mutation before giving up with a conflict.
pub const MAX_WRITE_ATTEMPTS: usize = 5;

/// Apply `mutate` to `user`'s library and persist it atomically.
///
/// `user` is the caller's already-loaded copy and is used for the first
/// attempt; later attempts reload from the store. Errors returned by
/// `mutate` abort immediately without writing. Returns the saved user and
/// whatever `mutate` returned on the successful attempt.
pub async fn update_library<F, T>(
    store: &dyn Store,
    user: User,
    mut mutate: F,
) -> AppResult<(User, T)>
where
    F: FnMut(&mut VideoLibrary) -> Result<T, CoreError> + Send,
    T: Send,
{
    let user_id = user.id;
    let mut current = user;

    for attempt in 1..=MAX_WRITE_ATTEMPTS {
        let mut library = current.library();
        let outcome = mutate(&mut library)?;

        if let Some(saved) = store
            .save_library(current.id, current.version, &library)
            .await?
        {
            return Ok((saved, outcome));
        }

        tracing::debug!(user_id, attempt, "Library write lost a race, reloading");
        current = store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(AppError::authentication_required)?;
    }

    tracing::warn!(user_id, attempts = MAX_WRITE_ATTEMPTS, "Library write kept conflicting");
    Err(AppError::Core(CoreError::Conflict(
        "The library was modified concurrently; please retry".into(),
    )))
}
