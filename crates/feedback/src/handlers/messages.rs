//! Form handlers posted from the dashboard.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use feedback_core::dashboard::TransitionError;
use feedback_core::error::feedback_error_to_status_code;

use super::flash::{redirect_with_flash, FlashMessage};
use super::pages::{load_list, render_dashboard};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplyForm {
    pub id: String,
    #[serde(default)]
    pub reply_text: String,
}

/// Handler for POST /messages/delete.
///
/// Redirects back to the dashboard; a failure travels as an error flash and
/// is shown inline on the unchanged list.
pub async fn delete_message(State(state): State<AppState>, Form(form): Form<DeleteForm>) -> Response {
    match state.service.delete_message(&form.id, &form.email).await {
        Ok(()) => redirect_with_flash("/", FlashMessage::success("Message deleted")),
        Err(e) => {
            tracing::warn!(id = %form.id, error = %e, "Dashboard delete failed");
            redirect_with_flash("/", FlashMessage::error(e.user_message()))
        }
    }
}

/// Handler for POST /messages/reply.
///
/// Renders the dashboard directly so a failed send keeps the typed draft.
pub async fn reply_to_message(State(state): State<AppState>, Form(form): Form<ReplyForm>) -> Response {
    let mut list = load_list(&state).await;
    let id = form.id.as_str();

    let request = list
        .open_reply(id)
        .and_then(|()| list.update_draft(id, form.reply_text))
        .and_then(|()| list.submit_reply(id));

    let request = match request {
        Ok(request) => request,
        Err(e) => {
            let status = match e {
                TransitionError::Validation(_) => StatusCode::BAD_REQUEST,
                TransitionError::NotLoaded => StatusCode::BAD_GATEWAY,
                _ => StatusCode::CONFLICT,
            };
            tracing::debug!(id = %id, error = %e, "Reply rejected before sending");
            let page = render_dashboard(&list, Some(FlashMessage::error(e.to_string())));
            return (status, page).into_response();
        }
    };

    let result = state
        .service
        .reply_to_message(&request.email, &request.original, &request.reply_text)
        .await;

    let status = match result {
        Ok(outcome) => {
            if let Err(e) = list.reply_finished(id, &outcome) {
                tracing::warn!(id = %id, error = %e, "Reply state out of sync");
            }
            StatusCode::OK
        }
        Err(e) => {
            let code = feedback_error_to_status_code(&e);
            if let Err(e) = list.reply_failed(id, e.user_message()) {
                tracing::warn!(id = %id, error = %e, "Reply state out of sync");
            }
            StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY)
        }
    };

    (status, render_dashboard(&list, None)).into_response()
}
