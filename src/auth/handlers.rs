//! Authentication handlers

use axum::{
    extract::{Extension, Query},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::extractors::{cookie_value, MaybeUser, SESSION_COOKIE, TOKEN_COOKIE};
use super::token;
use crate::common::{ApiError, AppState};

/// Callback query parameters. Both default to empty so a missing `state`
/// fails the comparison below instead of failing extraction.
#[derive(Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub state: String,
}

/// GET /api/login
/// Stores a fresh anti-forgery state in the caller's session and redirects
/// to GitHub's authorization endpoint.
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let oauth_state = Uuid::new_v4().to_string();

    let existing = cookie_value(&headers, SESSION_COOKIE);
    let session_id = state
        .sessions
        .begin(existing.as_deref(), oauth_state.clone())
        .await;

    let url = state.github.authorize_url(&oauth_state);
    info!(session_id = %session_id, "Redirecting to GitHub authorization endpoint");

    let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, session_id);
    ([(SET_COOKIE, cookie)], Redirect::to(&url))
}

/// GET /api/login/callback?code&state
/// Validates the anti-forgery state, exchanges the code, fetches the remote
/// profile, creates the identity on first login, and sets the bearer cookie.
pub async fn callback(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // The state comparison is the anti-CSRF check: a missing session, a
    // consumed session, and a mismatched value all reject identically,
    // before any identity is created or queried.
    let stored_state = match cookie_value(&headers, SESSION_COOKIE) {
        Some(session_id) => state.sessions.take_state(&session_id).await,
        None => None,
    };
    match stored_state {
        Some(stored) if stored == query.state => {}
        Some(_) => {
            warn!("OAuth state mismatch on callback");
            return Err(ApiError::BadRequest("Invalid OAuth state".to_string()));
        }
        None => {
            warn!("OAuth callback without a pending login session");
            return Err(ApiError::BadRequest("Invalid OAuth state".to_string()));
        }
    }

    let access_token = state.github.exchange_code(&query.code).await.map_err(|e| {
        error!(error = %e, "Failed to exchange code for token");
        ApiError::InternalServer("Failed to exchange code for token".to_string())
    })?;

    let profile = state.github.fetch_user(&access_token).await.map_err(|e| {
        error!(error = %e, "Failed to get user info from GitHub");
        ApiError::InternalServer("Failed to parse user info".to_string())
    })?;

    // First login creates the identity; later logins leave the stored row
    // untouched (no profile sync). A failed lookup falls through to the
    // insert, whose unique constraint keeps the flow idempotent either way.
    let known = match state.store.user_by_id(profile.id).await {
        Ok(row) => row.is_some(),
        Err(e) => {
            error!(error = %e, user_id = profile.id, "User lookup failed during callback");
            false
        }
    };
    if known {
        info!(user_id = profile.id, login = %profile.login, "Existing user login");
    } else {
        match state.store.insert_user(&profile).await {
            Ok(()) => info!(user_id = profile.id, login = %profile.login, "New user added"),
            Err(e) => {
                error!(error = %e, user_id = profile.id, "Failed to insert user, continuing login")
            }
        }
    }

    let token = token::issue(&profile.login, &state.jwt_secret).map_err(|e| {
        error!(error = %e, login = %profile.login, "JWT encoding error during callback");
        ApiError::InternalServer("Failed to generate token".to_string())
    })?;

    let expires = Utc::now() + Duration::hours(token::TOKEN_TTL_HOURS);
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; Max-Age={}; Expires={}",
        TOKEN_COOKIE,
        token,
        token::TOKEN_TTL_HOURS * 3600,
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    );

    info!(login = %profile.login, "User authentication successful via GitHub OAuth");
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/")))
}

/// GET /api/auth/status
/// Reports whether the caller holds a valid credential, with the profile
/// bits the frontend renders.
pub async fn auth_status(
    Extension(state): Extension<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
) -> (StatusCode, Json<serde_json::Value>) {
    let anonymous = (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "authenticated": false })),
    );

    let Some(login) = user else {
        return anonymous;
    };

    match state.store.user_by_login(&login).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "authenticated": true,
                "username": user.login,
                "avatar_url": user.avatar_url,
            })),
        ),
        Ok(None) => {
            warn!(login = %login, "Valid credential for unknown login");
            anonymous
        }
        Err(e) => {
            error!(error = %e, login = %login, "User lookup failed for auth status");
            anonymous
        }
    }
}
