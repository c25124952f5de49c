//! Leaderboard handlers

use axum::{
    extract::Extension,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::common::AppState;

pub const LEADERBOARD_LIMIT: i64 = 10;

/// Serving window for a cached leaderboard body; bounds both query load
/// and staleness.
pub const CACHE_TTL: Duration = Duration::from_secs(30);

const CACHE_CONTROL_VALUE: &str = "public, max-age=30";

/// GET /api/leaderboard
/// Top users by best wpm, served from a short-lived cache of the
/// serialized body. A failed query degrades to an empty board.
pub async fn leaderboard(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let headers = [
        (CONTENT_TYPE, "application/json"),
        (CACHE_CONTROL, CACHE_CONTROL_VALUE),
    ];

    if let Some(body) = state.leaderboard_cache.get().await {
        debug!("Serving leaderboard from cache");
        return (headers, body);
    }

    let entries = match state.store.leaderboard(LEADERBOARD_LIMIT).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "Leaderboard query failed, serving empty board");
            Vec::new()
        }
    };

    let body = serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string());
    state.leaderboard_cache.put(body.clone()).await;

    (headers, body)
}
