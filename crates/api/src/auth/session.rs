//! Signed session tokens.
//!
//! The session cookie carries an HS256-signed JWT whose `sid` claim names a
//! `user_sessions` record. The signature stops clients from forging session
//! keys; the server-side record makes logout and expiry authoritative.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vidnotes_core::types::{DbId, Timestamp};

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Key of the server-side session record.
    pub sid: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for session tokens and the cookie that carries them.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in hours (default: 336, two weeks).
    pub ttl_hours: i64,
    /// Cookie name (default: `session`).
    pub cookie_name: String,
    /// Emit `Secure; SameSite=None` (default: true). Disable only for plain-HTTP local setups.
    pub cookie_secure: bool,
    /// How often expired sessions are purged, in seconds (default: 3600).
    pub cleanup_interval_secs: u64,
}

const DEFAULT_TTL_HOURS: i64 = 24 * 14;
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 3600;
/// Ten years; keeps `expires_at` arithmetic well inside chrono's range.
const MAX_TTL_HOURS: i64 = 24 * 365 * 10;

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                         | Required | Default   |
    /// |---------------------------------|----------|-----------|
    /// | `SESSION_SECRET`                | **yes**  | --        |
    /// | `SESSION_TTL_HOURS`             | no       | `336`     |
    /// | `SESSION_COOKIE_NAME`           | no       | `session` |
    /// | `SESSION_COOKIE_SECURE`         | no       | `true`    |
    /// | `SESSION_CLEANUP_INTERVAL_SECS` | no       | `3600`    |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty, or if a numeric
    /// setting does not parse or is out of range.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let ttl_hours = std::env::var("SESSION_TTL_HOURS")
            .map_or(Ok(DEFAULT_TTL_HOURS), |raw| parse_ttl_hours(&raw))
            .unwrap_or_else(|msg| panic!("{msg}"));

        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "session".into());

        let cookie_secure: bool = std::env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("SESSION_COOKIE_SECURE must be true or false");

        let cleanup_interval_secs = std::env::var("SESSION_CLEANUP_INTERVAL_SECS")
            .map_or(Ok(DEFAULT_CLEANUP_INTERVAL_SECS), |raw| {
                parse_cleanup_interval_secs(&raw)
            })
            .unwrap_or_else(|msg| panic!("{msg}"));

        Self {
            secret,
            ttl_hours,
            cookie_name,
            cookie_secure,
            cleanup_interval_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_hours * 3600
    }
}

fn parse_ttl_hours(raw: &str) -> Result<i64, String> {
    let hours: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("SESSION_TTL_HOURS must be a valid integer, got {raw:?}"))?;
    if !(1..=MAX_TTL_HOURS).contains(&hours) {
        return Err(format!(
            "SESSION_TTL_HOURS must be between 1 and {MAX_TTL_HOURS}, got {hours}"
        ));
    }
    Ok(hours)
}

/// `tokio::time::interval` panics on a zero period.
fn parse_cleanup_interval_secs(raw: &str) -> Result<u64, String> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        format!("SESSION_CLEANUP_INTERVAL_SECS must be a valid integer, got {raw:?}")
    })?;
    if secs == 0 {
        return Err("SESSION_CLEANUP_INTERVAL_SECS must be greater than 0".to_string());
    }
    Ok(secs)
}

/// Generate a fresh random session key.
pub fn new_session_key() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Sign a session token for `user_id` that expires at `expires_at`.
pub fn encode_session_token(
    user_id: DbId,
    session_key: &str,
    expires_at: Timestamp,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = SessionClaims {
        sub: user_id,
        sid: session_key.to_string(),
        exp: expires_at.timestamp(),
        iat: chrono::Utc::now().timestamp(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate the signature and expiry of a session token and return its claims.
pub fn decode_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
