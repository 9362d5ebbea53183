use async_trait::async_trait;

use super::{
    BackendError, DeleteItemRequest, DeleteItemResponse, GetItemRequest, GetItemResponse,
    QueryRequest, QueryResponse, UpdateItemRequest, UpdateItemResponse,
};

/// Key-value backend offering point reads, conditional writes and range queries.
///
/// Retry and backoff belong to the implementation, not to the store.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Point lookup by key.
    async fn get_item(&self, request: &GetItemRequest) -> Result<GetItemResponse, BackendError>;

    /// Conditional update by key, returning the full post-update image.
    async fn update_item(
        &self,
        request: &UpdateItemRequest,
    ) -> Result<UpdateItemResponse, BackendError>;

    /// Conditional delete by key.
    async fn delete_item(
        &self,
        request: &DeleteItemRequest,
    ) -> Result<DeleteItemResponse, BackendError>;

    /// Range query on the table or one of its secondary indexes.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError>;
}
