//! In-memory backend implementation.
//!
//! Useful for testing without DynamoDB.

mod backend;

pub use backend::InMemoryBackend;
