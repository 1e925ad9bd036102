//! Handlers for login (password and Google OAuth) and logout.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;
use vidnotes_core::validation::normalize_email;
use vidnotes_db::models::session::CreateSession;
use vidnotes_db::models::user::User;
use vidnotes_db::{SessionStore, UserStore};

use crate::auth::cookie::{expired_session_cookie, session_cookie};
use crate::auth::password::verify_password;
use crate::auth::session::{encode_session_token, new_session_key};
use crate::error::{AppError, AppResult};
use crate::extract::{parse_validated, ValidatedJson};
use crate::middleware::auth::MaybeUser;
use crate::response::{StatusResponse, UserResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "email empty"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password empty"))]
    pub password: String,
}

/// Request body for `POST /v1/oauth/google/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthLoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "token empty"))]
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/login
///
/// Authenticate with email + password and start a session. A request that
/// already carries a valid session gets the current user back unchanged.
pub async fn login(
    State(state): State<AppState>,
    MaybeUser(current): MaybeUser,
    body: Bytes,
) -> AppResult<Response> {
    if let Some(current) = current {
        return Ok(Json(UserResponse::from(&current.user)).into_response());
    }

    let input: LoginRequest = parse_validated(&body)?;
    let email = normalize_email(&input.email);

    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected login with bad credentials");
        return Err(AppError::invalid_credentials());
    }

    let cookie = start_session(&state, &user).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(UserResponse::from(&user)),
    )
        .into_response())
}

/// POST /v1/oauth/google/login
///
/// Verify a Google access token, find or create the user by the verified
/// email, and start a session.
pub async fn google_login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<OAuthLoginRequest>,
) -> AppResult<Response> {
    let identity = state.verifier.verify(&input.token).await?;
    let email = normalize_email(&identity.email);

    let user = state.store.find_or_create_user(&email).await?;
    let cookie = start_session(&state, &user).await?;
    tracing::info!(user_id = user.id, "User logged in via Google");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(UserResponse::from(&user)),
    )
        .into_response())
}

/// POST /v1/logout
///
/// Revoke the current session, if any, and clear the cookie. Always 200.
pub async fn logout(
    State(state): State<AppState>,
    MaybeUser(current): MaybeUser,
) -> AppResult<Response> {
    if let Some(current) = current {
        state.store.revoke_session(&current.session_key).await?;
        tracing::info!(user_id = current.user.id, "User logged out");
    }

    Ok((
        AppendHeaders([(SET_COOKIE, expired_session_cookie(&state.config.session))]),
        Json(StatusResponse {
            status: "logged out",
        }),
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Persist a session record for `user` and return the `Set-Cookie` value.
async fn start_session(state: &AppState, user: &User) -> AppResult<String> {
    let config = &state.config.session;
    let session_key = new_session_key();
    let expires_at = Utc::now() + chrono::Duration::hours(config.ttl_hours);

    state
        .store
        .create_session(&CreateSession {
            user_id: user.id,
            session_key: session_key.clone(),
            expires_at,
        })
        .await?;

    let token = encode_session_token(user.id, &session_key, expires_at, config)
        .map_err(|e| AppError::InternalError(format!("Session token error: {e}")))?;

    Ok(session_cookie(config, &token))
}
