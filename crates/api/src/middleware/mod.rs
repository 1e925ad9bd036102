//! Authentication middleware extractors.
//!
//! - [`auth::CurrentUser`] -- requires a valid session and loads its user.
//! - [`auth::MaybeUser`] -- the same lookup, but optional.

pub mod auth;
