//! Tests for leaderboard module
//!
//! These tests drive the handler end to end against an in-memory store to
//! verify the response shape and the cache staleness bound.

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::auth::User;
    use crate::common::{migrations, AppState, Config};
    use crate::services::{sessions, GitHubService, ResponseCache, SessionService, Store};
    use axum::body::to_bytes;
    use axum::extract::Extension;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use std::time::Duration;

    async fn test_state(cache_ttl: Duration) -> Arc<AppState> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        migrations::run_migrations(&pool).await.unwrap();

        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            github_client_id: "client-id".to_string(),
            github_client_secret: "client-secret".to_string(),
            oauth_redirect_url: "http://localhost:3000/api/login/callback".to_string(),
            jwt_secret: "test_secret".to_string(),
            port: 3000,
            cors_origins: String::new(),
        };

        Arc::new(AppState {
            store: Store::new(pool),
            github: GitHubService::new(&config),
            sessions: SessionService::new(sessions::SESSION_TTL),
            leaderboard_cache: ResponseCache::new(cache_ttl),
            jwt_secret: config.jwt_secret,
        })
    }

    async fn seed_user(state: &AppState, id: i64, login: &str) {
        state
            .store
            .insert_user(&User {
                id,
                login: login.to_string(),
                name: None,
                avatar_url: None,
            })
            .await
            .unwrap();
    }

    async fn fetch_board(state: &Arc<AppState>) -> (StatusCode, String) {
        let response = handlers::leaderboard(Extension(state.clone()))
            .await
            .into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_leaderboard_response_shape() {
        let state = test_state(handlers::CACHE_TTL).await;
        seed_user(&state, 1, "alice").await;
        state.store.insert_result(1, 80, 95).await.unwrap();
        state.store.insert_result(1, 100, 90).await.unwrap();

        let (status, body) = fetch_board(&state).await;
        assert_eq!(status, StatusCode::OK);

        let entries: Vec<models::LeaderboardEntry> = serde_json::from_str(&body).unwrap();
        assert_eq!(
            entries,
            vec![models::LeaderboardEntry {
                login: "alice".to_string(),
                max_wpm: 100,
                accuracy: 90,
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_board_serializes_as_empty_array() {
        let state = test_state(handlers::CACHE_TTL).await;

        let (status, body) = fetch_board(&state).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn test_reads_within_ttl_are_byte_identical_across_writes() {
        let state = test_state(handlers::CACHE_TTL).await;
        seed_user(&state, 1, "alice").await;
        state.store.insert_result(1, 80, 95).await.unwrap();

        let (_, first) = fetch_board(&state).await;

        // A qualifying write lands between the two reads.
        state.store.insert_result(1, 120, 88).await.unwrap();

        let (_, second) = fetch_board(&state).await;
        assert_eq!(first, second);
        assert!(second.contains("\"max_wpm\":80"));
    }

    #[tokio::test]
    async fn test_read_after_ttl_expiry_reflects_writes() {
        let state = test_state(Duration::ZERO).await;
        seed_user(&state, 1, "alice").await;
        state.store.insert_result(1, 80, 95).await.unwrap();

        let (_, first) = fetch_board(&state).await;
        assert!(first.contains("\"max_wpm\":80"));

        state.store.insert_result(1, 120, 88).await.unwrap();

        let (_, second) = fetch_board(&state).await;
        assert!(second.contains("\"max_wpm\":120"));
    }

    #[tokio::test]
    async fn test_board_is_limited_to_top_ten() {
        let state = test_state(Duration::ZERO).await;
        for id in 1..=12 {
            seed_user(&state, id, &format!("user{}", id)).await;
            state.store.insert_result(id, 40 + id, 90).await.unwrap();
        }

        let (_, body) = fetch_board(&state).await;
        let entries: Vec<models::LeaderboardEntry> = serde_json::from_str(&body).unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].max_wpm, 52);
    }
}
