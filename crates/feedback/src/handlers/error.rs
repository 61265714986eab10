use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use feedback_core::error::{feedback_error_to_status_code, FeedbackError};

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Some(feedback_error) = self.0.downcast_ref::<FeedbackError>() else {
            tracing::error!(error = %self.0, "Unhandled request error");
            return (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response();
        };

        let code = feedback_error_to_status_code(feedback_error);
        let status_code =
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status_code, feedback_error.user_message()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
