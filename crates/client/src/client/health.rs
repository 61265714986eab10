//! Health check operations.

use serde::{Deserialize, Serialize};

use super::FeedbackClient;
use crate::error::Result;

/// Server build and backend summary.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub storage: String,
    pub notifier: String,
    pub list_cache_enabled: bool,
}

impl FeedbackClient {
    /// Liveness probe. Returns true when the server answers 200.
    pub async fn livez(&self) -> Result<bool> {
        let response = self.get("/api/livez").send().await?;
        Ok(response.status().is_success())
    }

    /// Backend summary.
    pub async fn healthz(&self) -> Result<HealthReport> {
        let response = self.get("/api/healthz").send().await?;
        self.handle_response(response, "health").await
    }
}
