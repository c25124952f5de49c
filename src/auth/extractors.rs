//! Request authentication extractor for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, error};

use super::token;
use crate::common::{safe_token_log, AppState};

pub(crate) const SESSION_COOKIE: &str = "session_id";
pub(crate) const TOKEN_COOKIE: &str = "token";

/// Optional authenticated identity.
///
/// Resolves the bearer token from the `token` cookie, falling back to an
/// `Authorization: Bearer` header, and verifies it. Absence or invalidity
/// is not a rejection: the request proceeds anonymously and each handler
/// decides what anonymous callers may do.
#[derive(Debug)]
pub struct MaybeUser(pub Option<String>);

/// Read a single cookie value out of the Cookie header.
pub(crate) fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Extract a bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extension =
            Extension::<Arc<AppState>>::from_request_parts(parts, state).await;
        let Ok(Extension(app_state)) = extension else {
            error!("Missing app state, treating request as anonymous");
            return Ok(MaybeUser(None));
        };

        let candidate = cookie_value(&parts.headers, TOKEN_COOKIE)
            .or_else(|| bearer_token(&parts.headers));

        let Some(candidate) = candidate else {
            return Ok(MaybeUser(None));
        };

        match token::verify(&candidate, &app_state.jwt_secret) {
            Some(login) => {
                debug!(login = %login, "Request authenticated");
                Ok(MaybeUser(Some(login)))
            }
            None => {
                debug!(
                    token = %safe_token_log(&candidate),
                    "Bearer token rejected, treating request as anonymous"
                );
                Ok(MaybeUser(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    #[test]
    fn test_cookie_value_single_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "token=abc123".parse().unwrap());

        assert_eq!(cookie_value(&headers, "token"), Some("abc123".to_string()));
    }

    #[test]
    fn test_cookie_value_among_multiple_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            "session_id=sid-1; token=abc123; theme=dark".parse().unwrap(),
        );

        assert_eq!(cookie_value(&headers, "token"), Some("abc123".to_string()));
        assert_eq!(
            cookie_value(&headers, "session_id"),
            Some("sid-1".to_string())
        );
    }

    #[test]
    fn test_cookie_value_missing_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "theme=dark".parse().unwrap());

        assert_eq!(cookie_value(&headers, "token"), None);
        assert_eq!(cookie_value(&HeaderMap::new(), "token"), None);
    }

    #[test]
    fn test_cookie_value_empty_value_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "token=; theme=dark".parse().unwrap());

        assert_eq!(cookie_value(&headers, "token"), None);
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());

        assert_eq!(bearer_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_bearer_token_requires_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        assert_eq!(bearer_token(&headers), None);
    }
}
