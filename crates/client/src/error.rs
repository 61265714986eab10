//! Client errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success answer other than 401/404. `message` is the response body.
    #[error("server answered {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The access gate redirected or refused the request.
    #[error("not signed in, pass --token or set FEEDBACK_TOKEN")]
    Unauthorized,

    /// The dashboard ended in an error state or showed a failure notice.
    #[error("{0}")]
    Dashboard(String),
}
