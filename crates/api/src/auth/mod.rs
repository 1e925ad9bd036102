//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- signed session tokens carried in the session cookie.
//! - [`cookie`] -- `Set-Cookie` construction and `Cookie` header parsing.
//! - [`google`] -- Google OAuth access-token verification.

pub mod cookie;
pub mod google;
pub mod password;
pub mod session;
