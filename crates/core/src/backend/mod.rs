//! The key-value backend collaborator the store drives.

mod error;
mod traits;
mod types;

pub use error::BackendError;
pub use traits::Backend;
pub use types::{
    DeleteItemRequest, DeleteItemResponse, GetItemRequest, GetItemResponse, Item, QueryRequest,
    QueryResponse, UpdateItemRequest, UpdateItemResponse,
};
