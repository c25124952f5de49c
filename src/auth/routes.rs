//! Authentication routes

use axum::{routing::get, Router};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `GET /api/login` - Start the GitHub OAuth flow
/// - `GET /api/login/callback` - OAuth callback, sets the bearer cookie
/// - `GET /api/auth/status` - Current authentication status
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/login", get(handlers::login))
        .route("/api/login/callback", get(handlers::callback))
        .route("/api/auth/status", get(handlers::auth_status))
}
