//! HTTP client for the feedback dashboard API.

pub mod health;
pub mod messages;

use reqwest::{redirect::Policy, RequestBuilder, Response, StatusCode};

use crate::error::{ClientError, Result};

/// HTTP client for the gated `/actions` API and the public probes.
#[derive(Debug, Clone)]
pub struct FeedbackClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl FeedbackClient {
    /// Create a new client with the given base URL.
    ///
    /// Redirects are not followed: the access gate answers unauthenticated
    /// requests with a redirect to the sign-in page.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach the operator token sent as a bearer credential.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Create from environment (FEEDBACK_URL or default, FEEDBACK_TOKEN).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("FEEDBACK_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let client = Self::new(base_url);
        match std::env::var("FEEDBACK_TOKEN") {
            Ok(token) if !token.is_empty() => client.with_token(token),
            _ => client,
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.url(path)))
    }

    /// Handle responses carrying a JSON body.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
        resource: &str,
    ) -> Result<T> {
        let response = check_status(response, resource).await?;
        response.json().await.map_err(ClientError::from)
    }

    /// Handle responses without a body.
    async fn handle_empty_response(&self, response: Response, resource: &str) -> Result<()> {
        check_status(response, resource).await.map(|_| ())
    }
}

async fn check_status(response: Response, resource: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::SEE_OTHER | StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound {
            resource: resource.to_string(),
        }),
        _ => {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
