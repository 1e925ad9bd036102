//! Session-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use vidnotes_db::models::user::User;
use vidnotes_db::{SessionStore, UserStore};

use crate::auth::cookie::read_cookie;
use crate::auth::session::decode_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// The logged-in user, loaded from the store for this request.
///
/// The session token is read from the session cookie, or from an
/// `Authorization: Bearer` header for non-browser clients. Rejects with 401
/// when there is no valid, unrevoked, unexpired session.
///
/// ```ignore
/// async fn my_handler(current: CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = current.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    /// Key of the session that authenticated this request.
    pub session_key: String,
}

/// Like [`CurrentUser`] but never rejects for a missing or invalid session.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(parts, state)
            .await?
            .ok_or_else(AppError::authentication_required)
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve_session(parts, state).await?))
    }
}

/// Resolve the request's session to a user.
///
/// `Ok(None)` covers every "not logged in" case; only store failures are errors.
async fn resolve_session(parts: &Parts, state: &AppState) -> Result<Option<CurrentUser>, AppError> {
    let session_config = &state.config.session;

    let token = read_cookie(&parts.headers, &session_config.cookie_name).or_else(|| {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    });
    let Some(token) = token else {
        return Ok(None);
    };

    let claims = match decode_session_token(token, session_config) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session token");
            return Ok(None);
        }
    };

    let Some(session) = state.store.find_active_session(&claims.sid).await? else {
        return Ok(None);
    };
    if session.user_id != claims.sub {
        tracing::warn!(
            session_user_id = session.user_id,
            token_user_id = claims.sub,
            "Session token subject does not match session record"
        );
        return Ok(None);
    }

    let user = state.store.find_user_by_id(session.user_id).await?;
    Ok(user.map(|user| CurrentUser {
        user,
        session_key: session.session_key,
    }))
}
