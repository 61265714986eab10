//! JSON output formatting.

use serde_json::json;

use feedback_core::dashboard::ListState;

/// Format a value as JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Format the dashboard state as a JSON object.
pub fn format_dashboard(state: &ListState) -> String {
    let value = match state {
        ListState::Loading => json!({"state": "loading"}),
        ListState::Error { message } => json!({"state": "error", "message": message}),
        ListState::Loaded(view) => json!({
            "state": "loaded",
            "notice": view.notice(),
            "messages": view.messages().collect::<Vec<_>>(),
        }),
    };
    value.to_string()
}
