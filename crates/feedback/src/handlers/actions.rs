//! JSON endpoints behind the access gate, used by the CLI client.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use feedback_core::message::FeedbackMessage;
use feedback_core::notify::ReplyOutcome;

use super::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reply_text: String,
}

/// GET /actions/messages
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedbackMessage>>, AppError> {
    let messages = state.service.list_messages().await?;
    Ok(Json(messages))
}

/// GET /actions/messages/{id}
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match state.service.get_message(&id).await? {
        Some(message) => Ok(Json(message).into_response()),
        None => Ok((StatusCode::NOT_FOUND, "Feedback message not found").into_response()),
    }
}

/// POST /actions/messages/delete
pub async fn delete_message(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Result<StatusCode, AppError> {
    state
        .service
        .delete_message(&request.id, &request.email)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /actions/messages/reply
///
/// A rejected delivery is still a 200 with `success: false`.
pub async fn reply_to_message(
    State(state): State<AppState>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<ReplyOutcome>, AppError> {
    let outcome = state
        .service
        .reply_to_message(&request.email, &request.message, &request.reply_text)
        .await?;
    Ok(Json(outcome))
}
