use std::{env, fmt, path::PathBuf, time::Duration};

use feedback_core::notify::DEFAULT_IDENTITY;

/// Static AWS credentials read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// AWS region (default: "eu-central-1")
    pub region: String,
    /// Static credentials. `None` falls back to the default provider chain.
    pub credentials: Option<StaticCredentials>,
    /// Custom endpoint for local DynamoDB/SES emulators.
    pub endpoint_url: Option<String>,
    /// Feedback table name (default: "qpply-feedback-messages")
    pub table_name: String,
    /// Sending identity; replies come from `support@<identity>` (default: "qpply.me")
    pub ses_identity: String,
    /// Operator tokens accepted by the access gate.
    pub access_tokens: Vec<String>,
    /// Session cookie name (default: "feedback_session")
    pub session_cookie: String,
    /// Whether the session cookie is marked `Secure` (default: true)
    pub cookie_secure: bool,
    /// List cache TTL in seconds, 0 disables (default: 15)
    pub list_cache_ttl_seconds: u64,
    /// JSON file of records loaded into the in-memory store.
    /// Note: Only used when the `inmemory` feature is enabled.
    #[allow(dead_code)]
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REGION` - AWS region (default: "eu-central-1")
    /// - `ACCESS_KEY_ID` / `SECRET_ACCESS_KEY` - static credentials (optional)
    /// - `AWS_ENDPOINT_URL` - custom endpoint (optional)
    /// - `DYNAMODB_TABLE_NAME_FEEDBACK` - table name (default: "qpply-feedback-messages")
    /// - `SES_IDENTITY` - sending identity (default: "qpply.me")
    /// - `FEEDBACK_ACCESS_TOKENS` - comma-separated operator tokens (default: none)
    /// - `SESSION_COOKIE_NAME` - session cookie (default: "feedback_session")
    /// - `COOKIE_SECURE` - secure session cookie (default: true)
    /// - `LIST_CACHE_TTL_SECONDS` - list cache TTL (default: 15)
    /// - `FEEDBACK_SEED_PATH` - seed file for the in-memory store (optional)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials = match (non_empty("ACCESS_KEY_ID"), non_empty("SECRET_ACCESS_KEY")) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };

        Self {
            region: non_empty("REGION").unwrap_or_else(|| "eu-central-1".to_string()),
            credentials,
            endpoint_url: non_empty("AWS_ENDPOINT_URL"),
            table_name: non_empty("DYNAMODB_TABLE_NAME_FEEDBACK")
                .unwrap_or_else(|| "qpply-feedback-messages".to_string()),
            ses_identity: non_empty("SES_IDENTITY").unwrap_or_else(|| DEFAULT_IDENTITY.to_string()),
            access_tokens: non_empty("FEEDBACK_ACCESS_TOKENS")
                .map(|v| parse_token_list(&v))
                .unwrap_or_default(),
            session_cookie: non_empty("SESSION_COOKIE_NAME")
                .unwrap_or_else(|| "feedback_session".to_string()),
            cookie_secure: non_empty("COOKIE_SECURE")
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
            list_cache_ttl_seconds: non_empty("LIST_CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            seed_path: non_empty("FEEDBACK_SEED_PATH").map(PathBuf::from),
        }
    }

    /// Get list cache TTL as a Duration.
    pub fn list_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.list_cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_token_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
