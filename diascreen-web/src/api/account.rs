//! Account handlers: login, logout, registration
//!
//! Form submissions are validated against the field rules before any
//! database work. Login failures redisplay the form without detail;
//! registration failures carry a validation message.

use axum::{
    extract::{Extension, Form, State},
    http::header::{COOKIE, SET_COOKIE},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{error, info};

use diascreen_common::db::{sessions, users};
use diascreen_common::Error;

use crate::api::pages;
use crate::api::session::{cookie_token, CurrentUser, SESSION_COOKIE};
use crate::forms;
use crate::AppState;

/// Login / registration form fields
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// GET /login
pub async fn login_page() -> Response {
    pages::login()
}

/// POST /login
///
/// On success sets the session cookie and redirects to the home page. On
/// invalid credentials the form is redisplayed with no further detail.
pub async fn login(State(state): State<AppState>, Form(form): Form<CredentialsForm>) -> Response {
    if forms::check_credentials(&form.username, &form.password).is_err() {
        return pages::login();
    }

    let user = match users::verify_credentials(&state.db, &form.username, &form.password).await {
        Ok(user) => user,
        Err(Error::InvalidCredentials) => return pages::login(),
        Err(e) => {
            error!("Login failed: {}", e);
            return pages::login();
        }
    };

    match sessions::create_session(&state.db, user.id).await {
        Ok(token) => {
            info!("User '{}' logged in", user.username);
            let cookie = format!(
                "{}={}; HttpOnly; Path=/; SameSite=Lax",
                SESSION_COOKIE, token
            );
            ([(SET_COOKIE, cookie)], Redirect::to("/")).into_response()
        }
        Err(e) => {
            error!("Failed to create session: {}", e);
            pages::login()
        }
    }
}

/// GET /logout (protected)
///
/// Deletes the session row, expires the cookie, and returns to the login
/// page.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
) -> Response {
    if let Some(token) = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(cookie_token)
    {
        if let Err(e) = sessions::delete_session(&state.db, &token).await {
            error!("Failed to delete session: {}", e);
        }
    }

    info!("User '{}' logged out", user.username);
    let expired = format!("{}=; HttpOnly; Path=/; Max-Age=0", SESSION_COOKIE);
    ([(SET_COOKIE, expired)], Redirect::to("/login")).into_response()
}

/// GET /register
pub async fn register_page() -> Response {
    pages::register(None)
}

/// POST /register
///
/// On success creates the user and redirects to the login page; on a rule
/// violation or duplicate username the form is redisplayed with the
/// validation message.
pub async fn register(State(state): State<AppState>, Form(form): Form<CredentialsForm>) -> Response {
    if let Err(message) = forms::check_credentials(&form.username, &form.password) {
        return pages::register(Some(&message));
    }

    match users::create_user(&state.db, &form.username, &form.password).await {
        Ok(_) => Redirect::to("/login").into_response(),
        Err(Error::DuplicateUsername(_)) => pages::register(Some(
            "That username already exists. Please choose a different one.",
        )),
        Err(e) => {
            error!("Registration failed: {}", e);
            pages::register(Some("Registration failed. Please try again."))
        }
    }
}
