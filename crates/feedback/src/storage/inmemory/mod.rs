//! In-memory storage backend for development and tests.
//!
//! Records are kept as raw JSON in store order, in either the tagged or the
//! flat wire shape, and go through the same normalization as records read
//! from DynamoDB.
//!
//! # Example
//!
//! ```rust,ignore
//! use feedback::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::from_seed_file("crates/feedback/seed.json").await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
