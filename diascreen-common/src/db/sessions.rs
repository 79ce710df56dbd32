//! Server-side session storage
//!
//! A session is an opaque UUID token held in an HttpOnly cookie; the row
//! keyed by the token carries the user id and an expiry. Cookie contents
//! never encode identity directly.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::users::User;
use crate::Result;

/// Session lifetime in seconds (7 days)
pub const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Create a session row for the user and return the opaque token
pub async fn create_session(pool: &SqlitePool, user_id: i64) -> Result<String> {
    let token = Uuid::new_v4().to_string();
    let expires_at = Utc::now().timestamp() + SESSION_TTL_SECS;

    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a session token to its user, ignoring expired rows
pub async fn session_user(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user: Option<User> = sqlx::query_as(
        r#"
        SELECT u.id, u.username, u.password_hash
        FROM sessions s JOIN users u ON u.id = s.user_id
        WHERE s.token = ? AND s.expires_at > ?
        "#,
    )
    .bind(token)
    .bind(Utc::now().timestamp())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Delete a session row (logout). Deleting an unknown token is a no-op.
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}
