// Process configuration, loaded once at startup

use std::env;

/// Immutable service configuration.
///
/// Constructed once in `main` and handed to component constructors; the
/// OAuth credentials and signing secret are required for the login flow to
/// function at all, so their absence is a startup failure rather than a
/// runtime condition.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub github_client_id: String,
    pub github_client_secret: String,
    pub oauth_redirect_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub cors_origins: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://typeboard.sqlite3".to_string()),
            github_client_id: env::var("GITHUB_CLIENT_ID").unwrap_or_default(),
            github_client_secret: env::var("GITHUB_CLIENT_SECRET").unwrap_or_default(),
            oauth_redirect_url: env::var("OAUTH_REDIRECT_URL").unwrap_or_default(),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(3000),
            cors_origins: env::var("CORS_ORIGINS").unwrap_or_else(|_| {
                "http://localhost:3000,http://localhost:5173".to_string()
            }),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let required = [
            ("GITHUB_CLIENT_ID", &self.github_client_id),
            ("GITHUB_CLIENT_SECRET", &self.github_client_secret),
            ("OAUTH_REDIRECT_URL", &self.oauth_redirect_url),
            ("JWT_SECRET", &self.jwt_secret),
        ];
        for (name, value) in required {
            if value.is_empty() {
                anyhow::bail!("missing required configuration: {}", name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            github_client_id: "client-id".to_string(),
            github_client_secret: "client-secret".to_string(),
            oauth_redirect_url: "http://localhost:3000/api/login/callback".to_string(),
            jwt_secret: "secret".to_string(),
            port: 3000,
            cors_origins: "http://localhost:3000".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(complete_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_client_id() {
        let mut config = complete_config();
        config.github_client_id = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GITHUB_CLIENT_ID"));
    }

    #[test]
    fn test_validate_rejects_missing_jwt_secret() {
        let mut config = complete_config();
        config.jwt_secret = String::new();

        assert!(config.validate().is_err());
    }
}
