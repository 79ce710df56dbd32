//! diascreen-web library - authenticated image classification service
//!
//! Serves the upload UI and the prediction endpoint behind a session gate.
//! Request flow: session gate → image normalization → model inference →
//! result rendering, all within one handler.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

use crate::infer::Classifier;

pub mod api;
pub mod forms;
pub mod infer;
pub mod render;

/// Application state shared across HTTP handlers
///
/// Both handles are immutable after startup. Handlers receive them through
/// axum state rather than process globals; the classifier is read-only
/// shared state and needs no locking.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Loaded classifier, shared across concurrent requests
    pub classifier: Arc<Classifier>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, classifier: Arc<Classifier>) -> Self {
        Self { db, classifier }
    }
}

/// Build application router
///
/// Protected routes pass through the session gate before any handler runs;
/// login, registration, and health stay public.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require a valid session)
    let protected = Router::new()
        .route("/", get(api::pages::home))
        .route("/predict", post(api::predict::predict))
        .route("/logout", get(api::account::logout))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::session::session_gate,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route(
            "/login",
            get(api::account::login_page).post(api::account::login),
        )
        .route(
            "/register",
            get(api::account::register_page).post(api::account::register),
        )
        .merge(api::health::health_routes());

    // Combine routers
    Router::new()
        .merge(protected)
        .merge(public)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
