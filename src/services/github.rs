// src/services/github.rs
use crate::auth::models::User;
use crate::common::Config;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_URL: &str = "https://api.github.com/user";

// Profile access only; nothing here needs write scopes.
const OAUTH_SCOPE: &str = "read:user";

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("token exchange failed: {0}")]
    ExchangeFailed(String),

    #[error("failed to parse provider response: {0}")]
    SerializationError(String),
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    error_description: Option<String>,
}

/// GitHub OAuth web-flow client.
///
/// Holds the provider credentials from [`Config`] for the lifetime of the
/// process. Every provider round-trip is a single attempt; retry policy is
/// left to the browser re-entering the flow.
#[derive(Debug, Clone)]
pub struct GitHubService {
    client_id: String,
    client_secret: String,
    redirect_url: String,
    client: Client,
}

impl GitHubService {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client_id: config.github_client_id.clone(),
            client_secret: config.github_client_secret.clone(),
            redirect_url: config.oauth_redirect_url.clone(),
            client,
        }
    }

    /// Build the authorization redirect URL carrying the anti-forgery state.
    pub fn authorize_url(&self, state: &str) -> String {
        let url = format!(
            "{}?client_id={}&redirect_uri={}&scope={}&state={}",
            AUTHORIZE_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_url),
            urlencoding::encode(OAUTH_SCOPE),
            urlencoding::encode(state)
        );

        debug!(scope = OAUTH_SCOPE, "Generated GitHub authorization URL");
        url
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, GitHubError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.redirect_url.as_str()),
        ];

        debug!("Exchanging authorization code for access token");

        let response = self
            .client
            .post(TOKEN_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| GitHubError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "Token exchange failed");
            return Err(GitHubError::ExchangeFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // GitHub reports bad codes with a 200 body carrying an error field,
        // so a present access_token is the real success signal.
        let token_response = response
            .json::<AccessTokenResponse>()
            .await
            .map_err(|e| GitHubError::SerializationError(e.to_string()))?;

        match token_response.access_token {
            Some(token) => Ok(token),
            None => {
                let reason = token_response
                    .error_description
                    .unwrap_or_else(|| "no access token in response".to_string());
                error!(error = %reason, "Token exchange rejected by provider");
                Err(GitHubError::ExchangeFailed(reason))
            }
        }
    }

    /// Fetch the authenticated user's profile with an access token.
    pub async fn fetch_user(&self, access_token: &str) -> Result<User, GitHubError> {
        let response = self
            .client
            .get(USER_URL)
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, "typeboard-api")
            .send()
            .await
            .map_err(|e| GitHubError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "User profile fetch failed");
            return Err(GitHubError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let user = response
            .json::<User>()
            .await
            .map_err(|e| GitHubError::SerializationError(e.to_string()))?;

        debug!(user_id = user.id, login = %user.login, "Fetched GitHub user profile");
        Ok(user)
    }
}
