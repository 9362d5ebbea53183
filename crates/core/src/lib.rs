//! Core types and pure functions for dynastore.
//!
//! Nothing in this crate performs I/O. The [`backend::Backend`] trait describes the
//! key-value collaborator the store drives; concrete backends and the `Store` façade
//! live in the `dynastore` crate.

pub mod backend;
pub mod context;
pub mod cursor;
pub mod error;
pub mod expression;
pub mod fields;
pub mod hooks;
pub mod key;
pub mod options;
pub mod result;

pub use backend::{Backend, BackendError, Item};
pub use context::{Operation, OperationContext, OperationDetails};
pub use cursor::{decode_last_evaluated_key, encode_last_evaluated_key, CursorError};
pub use error::{Result, StoreError};
pub use expression::{Condition, KeyCondition, UpdateAction, UpdateExpression};
pub use fields::FieldsDef;
pub use hooks::{NoopHooks, Request, Response, StoreHooks};
pub use key::{Key, KeyKind, TextKey};
pub use options::{
    DeleteOption, DeleteOptions, IndexDef, ReadOption, ReadOptions, StoreOption, StoreOptions,
    WriteOption, WriteOptions,
};
pub use result::{ConsumedCapacity, OperationResult};
