//! feedback_client - CLI client for the feedback dashboard API.

pub mod api;
pub mod cli;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod output;

pub use api::FeedbackApi;
pub use client::FeedbackClient;
pub use dashboard::Dashboard;
pub use error::{ClientError, Result};
