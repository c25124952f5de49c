// Application state shared across all modules

use crate::services::{GitHubService, ResponseCache, SessionService, Store};

/// Application state containing the store, services, and the signing secret.
///
/// Built once at startup from [`crate::common::Config`] and shared behind a
/// single `Arc`; nothing in here is mutated after construction.
pub struct AppState {
    pub store: Store,
    pub github: GitHubService,
    pub sessions: SessionService,
    pub leaderboard_cache: ResponseCache,
    pub jwt_secret: String,
}
