//! Generic key-value store over DynamoDB.
//!
//! [`Store`] turns typed create, get, update, delete and prefix-list calls into
//! conditional backend requests with optimistic locking on a version attribute.
//! The backend is selected at construction time:
//!
//! - `dynamodb` (default): [`DynamoDbBackend`] using `aws-sdk-dynamodb`
//! - `inmemory` (default): [`InMemoryBackend`], for tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use dynastore::{InMemoryBackend, OperationContext, Store, WriteOption};
//!
//! # async fn run() -> dynastore::Result<()> {
//! let store: Store<String, String, Vec<u8>> =
//!     Store::new(Arc::new(InMemoryBackend::new()), "dynastore", []);
//!
//! let ctx = OperationContext::new();
//! let result = store
//!     .create(&ctx, &"A".into(), &"s1".into(), &b"data".to_vec(), [])
//!     .await?;
//! assert_eq!(result.version, 1);
//!
//! store
//!     .update(&ctx, &"A".into(), &"s1".into(), &b"more".to_vec(), [WriteOption::version(1)])
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod hooks;
mod store;

pub use dynastore_core::{
    decode_last_evaluated_key, encode_last_evaluated_key, Backend, BackendError, Condition,
    ConsumedCapacity, CursorError, DeleteOption, DeleteOptions, FieldsDef, IndexDef, Item, Key,
    KeyCondition, KeyKind, NoopHooks, Operation, OperationContext, OperationDetails,
    OperationResult, ReadOption, ReadOptions, Request, Response, Result, StoreError, StoreHooks,
    StoreOption, StoreOptions, TextKey, UpdateAction, UpdateExpression, WriteOption, WriteOptions,
};

#[cfg(feature = "dynamodb")]
pub use backend::DynamoDbBackend;
#[cfg(feature = "inmemory")]
pub use backend::InMemoryBackend;
pub use config::StoreConfig;
pub use hooks::TracingHooks;
pub use store::Store;
