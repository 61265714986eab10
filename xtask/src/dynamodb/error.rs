//! Errors for the table management commands.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DynamodbError>;

#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' not found, run `cargo xtask dynamodb deploy` first")]
    TableNotFound { table_name: String },

    #[error("Table '{table_name}' exists with key schema [{found}], expected [id, email]")]
    KeySchemaMismatch { table_name: String, found: String },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Table '{table_name}' not active after {waited_secs}s")]
    ActivationTimeout { table_name: String, waited_secs: u64 },
}
