pub mod actions;
pub mod error;
pub mod flash;
pub mod health;
pub mod messages;
pub mod pages;
pub mod session;

pub use error::AppError;
