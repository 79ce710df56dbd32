//! Session gate middleware
//!
//! Every protected route passes through here before producing a response. A
//! valid session cookie attaches the authenticated identity to the request;
//! anything else short-circuits with a redirect to the login page. The gate
//! never surfaces an error to the caller.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::warn;

use diascreen_common::db::sessions;

use crate::AppState;

/// Cookie name holding the opaque session token
pub const SESSION_COOKIE: &str = "session";

/// Authenticated identity for the remainder of a request
///
/// Inserted into request extensions by the gate; handlers extract it with
/// `Extension<CurrentUser>` instead of reaching for ambient state.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Middleware gating protected routes
///
/// On success, `CurrentUser` is available to the downstream handler. On a
/// missing, unknown, or expired session the request is redirected to
/// `/login` without reaching the handler.
pub async fn session_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(cookie_token);

    let Some(token) = token else {
        return Redirect::to("/login").into_response();
    };

    match sessions::session_user(&state.db, &token).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(CurrentUser {
                id: user.id,
                username: user.username,
            });
            next.run(request).await
        }
        Ok(None) => Redirect::to("/login").into_response(),
        Err(e) => {
            warn!("Session lookup failed: {}", e);
            Redirect::to("/login").into_response()
        }
    }
}

/// Extract the session token from a Cookie header value
pub fn cookie_token(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_token_parsing() {
        assert_eq!(cookie_token("session=abc123"), Some("abc123".to_string()));
        assert_eq!(
            cookie_token("theme=dark; session=abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            cookie_token("session=abc123; theme=dark"),
            Some("abc123".to_string())
        );
        assert_eq!(cookie_token("theme=dark"), None);
        assert_eq!(cookie_token(""), None);
    }
}
