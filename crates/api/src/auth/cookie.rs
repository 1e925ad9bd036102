//! Session cookie formatting and lookup.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

use super::session::SessionConfig;

/// Build the `Set-Cookie` value that stores `token` for the configured TTL.
///
/// Secure cookies are sent cross-site (`SameSite=None`), which is what a
/// browser extension talking to this API needs.
pub fn session_cookie(config: &SessionConfig, token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; Max-Age={}{}",
        config.cookie_name,
        token,
        config.ttl_secs(),
        site_attributes(config)
    )
}

/// Build a `Set-Cookie` value that makes the browser drop the session cookie.
pub fn expired_session_cookie(config: &SessionConfig) -> String {
    format!(
        "{}=; Path=/; HttpOnly; Max-Age=0{}",
        config.cookie_name,
        site_attributes(config)
    )
}

fn site_attributes(config: &SessionConfig) -> &'static str {
    if config.cookie_secure {
        "; SameSite=None; Secure"
    } else {
        "; SameSite=Lax"
    }
}

/// Find the value of cookie `name` across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
