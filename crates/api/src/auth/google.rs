//! Google OAuth access-token verification.
//!
//! The client obtains an access token from Google and hands it to
//! `POST /v1/oauth/google/login`. [`GoogleTokenVerifier`] forwards it to
//! Google's token-info endpoint and accepts it only when the endpoint answers
//! `200 OK` with a verified email address.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// Default Google token-info endpoint.
pub const DEFAULT_TOKENINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/tokeninfo";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the token verifier.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub tokeninfo_url: String,
    /// Upper bound on the verification round trip.
    pub timeout_secs: u64,
}

impl OAuthConfig {
    /// Load OAuth configuration from environment variables.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `GOOGLE_TOKENINFO_URL` | [`DEFAULT_TOKENINFO_URL`] |
    /// | `OAUTH_TIMEOUT_SECS`   | `10`                    |
    pub fn from_env() -> Self {
        let tokeninfo_url =
            std::env::var("GOOGLE_TOKENINFO_URL").unwrap_or_else(|_| DEFAULT_TOKENINFO_URL.into());

        let timeout_secs: u64 = std::env::var("OAUTH_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("OAUTH_TIMEOUT_SECS must be a valid u64");

        Self {
            tokeninfo_url,
            timeout_secs,
        }
    }
}

/// Identity established by a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    /// Provider-side subject id, when reported.
    pub subject: Option<String>,
}

/// Errors from token verification.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("OAuth provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with something other than `200 OK`.
    #[error("OAuth provider rejected the token (HTTP {0})")]
    Rejected(u16),

    #[error("Email address is not verified")]
    EmailNotVerified,

    #[error("OAuth provider did not report an email address")]
    MissingEmail,
}

/// Verifies a client-supplied OAuth token.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, VerifyError>;
}

/// Google reports `email_verified` as a JSON bool or as the string `"true"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    fn is_true(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(s) => s.eq_ignore_ascii_case("true"),
        }
    }
}

/// Subset of the token-info response this service relies on.
#[derive(Debug, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<Flag>,
    #[serde(default)]
    sub: Option<String>,
}

impl TokenInfo {
    /// Accept the token only if it names a verified, non-empty email.
    pub fn into_identity(self) -> Result<VerifiedIdentity, VerifyError> {
        if !self.email_verified.as_ref().is_some_and(Flag::is_true) {
            return Err(VerifyError::EmailNotVerified);
        }
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or(VerifyError::MissingEmail)?;
        Ok(VerifiedIdentity {
            email,
            subject: self.sub,
        })
    }
}

/// [`TokenVerifier`] backed by Google's token-info endpoint.
pub struct GoogleTokenVerifier {
    client: reqwest::Client,
    tokeninfo_url: String,
}

impl GoogleTokenVerifier {
    pub fn new(config: &OAuthConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            tokeninfo_url: config.tokeninfo_url.clone(),
        })
    }
}

#[async_trait]
impl TokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, VerifyError> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("access_token", token)])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::info!(status = status.as_u16(), "Token info endpoint rejected token");
            return Err(VerifyError::Rejected(status.as_u16()));
        }

        response.json::<TokenInfo>().await?.into_identity()
    }
}
