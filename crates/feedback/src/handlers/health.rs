//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/api/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/api/healthz` - Build and backend summary (no remote calls)

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[cfg(feature = "inmemory")]
const STORAGE_BACKEND: &str = "inmemory";
#[cfg(feature = "dynamodb")]
const STORAGE_BACKEND: &str = "dynamodb";

#[cfg(feature = "outbox")]
const NOTIFIER_BACKEND: &str = "outbox";
#[cfg(feature = "ses")]
const NOTIFIER_BACKEND: &str = "ses";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub storage: &'static str,
    pub notifier: &'static str,
    pub list_cache_enabled: bool,
}

/// GET /api/livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /api/healthz - Reports which backends this build serves from.
pub async fn healthz(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: STORAGE_BACKEND,
        notifier: NOTIFIER_BACKEND,
        list_cache_enabled: state.config.list_cache_ttl_seconds > 0,
    })
}
