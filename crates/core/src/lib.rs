//! Domain types shared by the store and the HTTP layer.

pub mod error;
pub mod library;
pub mod types;
pub mod validation;
