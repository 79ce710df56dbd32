//! Database access layer for DiaScreen
//!
//! SQLite via sqlx. Schema is created idempotently at startup; the users
//! table carries the uniqueness constraint the registration flow relies on.

pub mod init;
pub mod sessions;
pub mod users;

pub use init::init_database;
pub use users::User;
