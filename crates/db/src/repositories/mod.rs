//! SQL for each table, as zero-sized structs whose methods take `&PgPool`.

pub mod session_repo;
pub mod user_repo;

pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
