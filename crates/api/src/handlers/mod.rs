pub mod annotation;
pub mod auth;
