//! Leaderboard routes

use axum::{routing::get, Router};

use super::handlers;

/// Creates and returns the leaderboard router
///
/// # Routes
/// - `GET /api/leaderboard` - Top users by best wpm, cached 30s
pub fn leaderboard_routes() -> Router {
    Router::new().route("/api/leaderboard", get(handlers::leaderboard))
}
