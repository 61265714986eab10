//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StorageError` from `feedback_core::storage`.
//! Typed service errors map directly; anything else is classified by its
//! error code, which is how authorization and validation failures arrive.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use feedback_core::message::MessageKey;
use feedback_core::storage::{classify_error_code, StorageError};

/// Map a Scan SDK error to StorageError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table_name: &str,
) -> StorageError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            StorageError::NotFound(format!("table {table_name}"))
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            StorageError::Other("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            StorageError::Other("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            StorageError::Other("DynamoDB internal server error".to_string())
        }
        err => classify_error_code(err.code(), describe(err.message(), &err)),
    }
}

/// Map a DeleteItem SDK error to StorageError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table_name: &str,
    key: &MessageKey,
) -> StorageError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => {
            StorageError::NotFound(format!("feedback message {key}"))
        }
        DeleteItemError::ResourceNotFoundException(_) => {
            StorageError::NotFound(format!("table {table_name}"))
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            StorageError::Other("Throughput exceeded, please retry".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            StorageError::Other("Request limit exceeded, please retry".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            StorageError::Other("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            StorageError::Other("DynamoDB internal server error".to_string())
        }
        err => classify_error_code(err.code(), describe(err.message(), &err)),
    }
}

fn describe(message: Option<&str>, err: &impl std::fmt::Display) -> String {
    message
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}
