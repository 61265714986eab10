//! Access gate rules: which routes are public and how credentials are read.

use async_trait::async_trait;

/// Route prefixes reachable without an authenticated session.
pub const PUBLIC_ROUTE_PREFIXES: [&str; 3] = ["/sign-in", "/api", "/static"];

/// Path of the sign-in view.
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Decides whether a presented credential belongs to an authenticated session.
#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn is_authenticated(&self, credential: Option<&str>) -> bool;
}

/// Returns true if `path` is on the public allow-list.
pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Validates a `return_to` URL to prevent open redirect attacks.
///
/// Returns `Some(url)` if the URL is a safe relative path, `None` otherwise.
///
/// ```
/// use feedback_core::access::validate_return_to;
///
/// assert_eq!(validate_return_to("/?reply=1"), Some("/?reply=1"));
/// assert_eq!(validate_return_to("//evil.com"), None);
/// assert_eq!(validate_return_to("https://evil.com"), None);
/// ```
pub fn validate_return_to(url: &str) -> Option<&str> {
    if !url.starts_with('/') {
        return None;
    }

    // Protocol-relative (//evil.com) and backslash variants.
    if url.starts_with("//") || url.starts_with("/\\") {
        return None;
    }

    if url.chars().any(|c| c.is_control()) {
        return None;
    }

    if url.contains("://") {
        return None;
    }

    Some(url)
}
