//! feedback_core - functional core for the feedback desk.
//!
//! Pure data types, normalization, validation and the dashboard state
//! machine. Nothing in this crate performs I/O; the `feedback` server and
//! `feedback_client` crates provide the imperative shell around it.

pub mod access;
pub mod dashboard;
pub mod error;
pub mod message;
pub mod notify;
pub mod storage;
