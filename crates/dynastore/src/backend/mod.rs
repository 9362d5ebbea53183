//! Backend implementations.
//!
//! Each backend implements [`dynastore_core::Backend`] and is enabled by its
//! feature flag. Both can be compiled in at the same time.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbBackend;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryBackend;
