use std::sync::Arc;

use vidnotes_db::Store;

use crate::auth::google::TokenVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// User and session persistence (PostgreSQL or in-memory).
    pub store: Arc<dyn Store>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// OAuth token verifier.
    pub verifier: Arc<dyn TokenVerifier>,
}
