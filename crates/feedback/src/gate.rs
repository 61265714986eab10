//! Access gate: token-based sessions and the middleware guarding routes.

use std::collections::HashSet;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use feedback_core::access::{is_public_route, parse_bearer, AccessGate, SIGN_IN_PATH};

use crate::config::Config;
use crate::state::AppState;

/// Gate accepting a fixed set of operator tokens.
///
/// With no tokens configured every credential is rejected.
#[derive(Debug, Clone, Default)]
pub struct TokenGate {
    tokens: HashSet<String>,
}

impl TokenGate {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.access_tokens.is_empty() {
            tracing::warn!("FEEDBACK_ACCESS_TOKENS is empty, every gated route will be denied");
        }
        Self::new(config.access_tokens.iter().cloned())
    }
}

#[async_trait]
impl AccessGate for TokenGate {
    async fn is_authenticated(&self, credential: Option<&str>) -> bool {
        credential.is_some_and(|token| self.tokens.contains(token))
    }
}

/// Reads the credential from the bearer header, falling back to the cookie.
fn credential(request: &Request, cookie_name: &str) -> Option<String> {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer)
        .map(str::to_string);

    bearer.or_else(|| {
        CookieJar::from_headers(request.headers())
            .get(cookie_name)
            .map(|cookie| cookie.value().to_string())
    })
}

/// Builds the sign-in redirect that returns to `path_and_query` afterwards.
pub fn sign_in_redirect(path_and_query: &str) -> Redirect {
    if path_and_query == "/" {
        return Redirect::to(SIGN_IN_PATH);
    }
    Redirect::to(&format!(
        "{SIGN_IN_PATH}?return_to={}",
        urlencoding::encode(path_and_query)
    ))
}

/// Middleware that lets public routes through and requires a session
/// everywhere else. Unauthenticated requests get a 303 to the sign-in view.
pub async fn require_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if is_public_route(&path) {
        return next.run(request).await;
    }

    let token = credential(&request, &state.config.session_cookie);
    if state.gate.is_authenticated(token.as_deref()).await {
        return next.run(request).await;
    }

    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(&path);

    tracing::debug!(path = %path, has_credential = token.is_some(), "Redirecting to sign-in");
    sign_in_redirect(target).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_gate() {
        let gate = TokenGate::new(["alpha", "beta"]);

        assert!(gate.is_authenticated(Some("alpha")).await);
        assert!(!gate.is_authenticated(Some("gamma")).await);
        assert!(!gate.is_authenticated(None).await);
    }

    #[tokio::test]
    async fn test_empty_gate_denies_everything() {
        let gate = TokenGate::default();
        assert!(!gate.is_authenticated(Some("")).await);
        assert!(!gate.is_authenticated(Some("alpha")).await);
    }

    #[test]
    fn test_sign_in_redirect_location() {
        let response = sign_in_redirect("/?reply=1").into_response();
        let location = response.headers().get("location").unwrap();
        assert_eq!(location, "/sign-in?return_to=%2F%3Freply%3D1");

        let response = sign_in_redirect("/").into_response();
        assert_eq!(response.headers().get("location").unwrap(), "/sign-in");
    }
}
