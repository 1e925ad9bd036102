use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vidnotes_core::error::CoreError;
use vidnotes_db::StoreError;

use crate::auth::google::VerifyError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent `{"error", "code"}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vidnotes_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// OAuth token verification failed.
    #[error(transparent)]
    OAuth(#[from] VerifyError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The error returned for unknown emails, OAuth-only accounts and wrong passwords alike.
    pub fn invalid_credentials() -> Self {
        AppError::BadRequest("Invalid email or password".into())
    }

    pub fn authentication_required() -> Self {
        AppError::Core(CoreError::Unauthorized("Authentication required".into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} {key} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Store errors ---
            AppError::Store(StoreError::DuplicateEmail(email)) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("A user with email {email} already exists"),
            ),
            AppError::Store(StoreError::Database(err)) => database_error(err),

            // --- OAuth verification ---
            AppError::OAuth(VerifyError::Request(err)) => {
                tracing::error!(error = %err, "OAuth provider unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    "OAUTH_UNAVAILABLE",
                    "OAuth provider unavailable".to_string(),
                )
            }
            AppError::OAuth(err) => (StatusCode::BAD_REQUEST, "OAUTH_REJECTED", err.to_string()),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Database failures never leak driver detail to the client.
///
/// Unique violations are turned into [`StoreError::DuplicateEmail`] by the
/// store, so whatever reaches this point is a server-side fault.
fn database_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::Database(db_err) => {
            let sqlstate = db_err.code();
            tracing::error!(
                error = %db_err,
                sqlstate = sqlstate.as_deref().unwrap_or("-"),
                "Database error"
            );
        }
        sqlx::Error::PoolTimedOut => tracing::error!("Database pool exhausted"),
        other => tracing::error!(error = %other, "Database error"),
    }
    internal()
}
