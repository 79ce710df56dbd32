//! User storage: registration and credential verification

use sqlx::SqlitePool;
use tracing::info;

use crate::auth;
use crate::{Error, Result};

/// A registered user row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// Register a new user.
///
/// The plaintext password is hashed before it touches the database and is
/// never persisted or logged. Username uniqueness is enforced by the UNIQUE
/// constraint; a constraint violation maps to `Error::DuplicateUsername`.
/// Matching is case-sensitive exact match.
pub async fn create_user(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    let password_hash = auth::hash_password(password)?;

    let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
        .bind(username)
        .bind(&password_hash)
        .execute(pool)
        .await;

    match result {
        Ok(done) => {
            let id = done.last_insert_rowid();
            info!("Registered user '{}' (id {})", username, id);
            Ok(User {
                id,
                username: username.to_string(),
                password_hash,
            })
        }
        Err(sqlx::Error::Database(db_err))
            if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            Err(Error::DuplicateUsername(username.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Look up a user by username and verify the password against the stored
/// hash.
///
/// Read-only. Unknown username and wrong password both yield
/// `Error::InvalidCredentials`; the caller cannot tell them apart.
pub async fn verify_credentials(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    let user: Option<User> =
        sqlx::query_as("SELECT id, username, password_hash FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;

    let Some(user) = user else {
        return Err(Error::InvalidCredentials);
    };

    if auth::verify_password(password, &user.password_hash)? {
        Ok(user)
    } else {
        Err(Error::InvalidCredentials)
    }
}
