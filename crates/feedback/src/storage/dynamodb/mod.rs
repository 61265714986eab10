//! DynamoDB storage backend implementation.
//!
//! The feedback table is keyed by `id` (partition key) and `email` (sort
//! key). Records are read with full scans and deleted by composite key.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
