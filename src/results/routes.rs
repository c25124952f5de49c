//! Typing-test submission routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the submission router
///
/// # Routes
/// - `POST /api/submit` - Record a typing-test result
pub fn results_routes() -> Router {
    Router::new().route("/api/submit", post(handlers::submit))
}
