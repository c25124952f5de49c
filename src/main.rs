// src/main.rs
use axum::{extract::Extension, routing::get, Router};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::time::Duration;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod auth;
mod common;
mod leaderboard;
mod results;
mod services;

use common::{AppState, Config};
use leaderboard::handlers::CACHE_TTL;
use services::{sessions::SESSION_TTL, GitHubService, ResponseCache, SessionService, Store};

async fn health_check() -> &'static str {
    "all ok 👍🏻"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Missing OAuth credentials or signing secret abort startup here;
    // nothing below runs with a partial configuration.
    let config = Config::from_env()?;

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
        .max_connections(25)
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool).await?;

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let store = Store::new(pool);
    info!("Store initialized");

    let github = GitHubService::new(&config);
    info!("GitHubService initialized");

    let sessions = SessionService::new(SESSION_TTL);
    info!("SessionService initialized");

    let leaderboard_cache = ResponseCache::new(CACHE_TTL);
    info!("Leaderboard cache initialized");

    let app_state = AppState {
        store,
        github,
        sessions,
        leaderboard_cache,
        jwt_secret: config.jwt_secret.clone(),
    };

    let shared = Arc::new(app_state);

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let app = Router::new()
        .merge(auth::auth_routes())
        .merge(results::results_routes())
        .merge(leaderboard::leaderboard_routes())
        .route("/api/health_check", get(health_check))
        .layer(Extension(shared))
        .layer({
            let origins: Vec<axum::http::HeaderValue> = config
                .cors_origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                ])
                .allow_credentials(true)
        })
        .layer(TraceLayer::new_for_http());

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
