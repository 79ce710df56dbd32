//! HTML page serving
//!
//! Static shells compiled in with `include_str!`; dynamic values are spliced
//! into `{{...}}` slots by plain string replacement. No template engine.

use axum::extract::Extension;
use axum::response::{Html, IntoResponse, Response};

use crate::api::session::CurrentUser;

const LOGIN_HTML: &str = include_str!("../ui/login.html");
const REGISTER_HTML: &str = include_str!("../ui/register.html");
const HOME_HTML: &str = include_str!("../ui/home.html");
const RESULT_HTML: &str = include_str!("../ui/result.html");

/// GET / (protected)
///
/// Home page with the upload form.
pub async fn home(Extension(user): Extension<CurrentUser>) -> Response {
    Html(HOME_HTML.replace("{{username}}", &escape(&user.username))).into_response()
}

/// Login form page
pub fn login() -> Response {
    Html(LOGIN_HTML).into_response()
}

/// Registration form page, optionally with a validation message
pub fn register(message: Option<&str>) -> Response {
    let message = message.map(escape).unwrap_or_default();
    Html(REGISTER_HTML.replace("{{message}}", &message)).into_response()
}

/// Result page wrapping the rendered prediction text
pub fn result(prediction_text: &str) -> Response {
    Html(RESULT_HTML.replace("{{prediction_text}}", &escape(prediction_text))).into_response()
}

/// Minimal HTML escaping for user-controlled values
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
