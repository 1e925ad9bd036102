//! vidnotes API server library.
//!
//! Exposes the building blocks (config, state, error handling, extractors,
//! routes) so integration tests and both binaries can share them.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod library;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod seed;
pub mod state;
pub mod telemetry;
