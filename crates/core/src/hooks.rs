//! Instrumentation hooks invoked around every backend call.

use crate::backend::{
    DeleteItemRequest, DeleteItemResponse, GetItemRequest, GetItemResponse, QueryRequest,
    QueryResponse, UpdateItemRequest, UpdateItemResponse,
};
use crate::context::OperationContext;
use crate::result::ConsumedCapacity;

/// A backend request about to be dispatched.
#[derive(Debug, Clone, Copy)]
pub enum Request<'a> {
    GetItem(&'a GetItemRequest),
    UpdateItem(&'a UpdateItemRequest),
    DeleteItem(&'a DeleteItemRequest),
    Query(&'a QueryRequest),
}

impl Request<'_> {
    pub fn table_name(&self) -> &str {
        match self {
            Request::GetItem(r) => &r.table_name,
            Request::UpdateItem(r) => &r.table_name,
            Request::DeleteItem(r) => &r.table_name,
            Request::Query(r) => &r.table_name,
        }
    }
}

/// A backend response that was just received.
#[derive(Debug, Clone, Copy)]
pub enum Response<'a> {
    GetItem(&'a GetItemResponse),
    UpdateItem(&'a UpdateItemResponse),
    DeleteItem(&'a DeleteItemResponse),
    Query(&'a QueryResponse),
}

impl Response<'_> {
    pub fn consumed_capacity(&self) -> Option<&ConsumedCapacity> {
        match self {
            Response::GetItem(r) => r.consumed_capacity.as_ref(),
            Response::UpdateItem(r) => r.consumed_capacity.as_ref(),
            Response::DeleteItem(r) => r.consumed_capacity.as_ref(),
            Response::Query(r) => r.consumed_capacity.as_ref(),
        }
    }
}

/// Callbacks that can instrument a store.
///
/// Both methods receive the call's context and return it, possibly annotated.
/// The context returned by `request_built` is passed to `response_received`.
pub trait StoreHooks<P, S>: Send + Sync {
    /// Invoked before the request is dispatched to the backend.
    fn request_built(
        &self,
        ctx: OperationContext,
        _partition_key: &P,
        _sort_key: &S,
        _request: Request<'_>,
    ) -> OperationContext {
        ctx
    }

    /// Invoked after a successful response is received.
    fn response_received(
        &self,
        ctx: OperationContext,
        _partition_key: &P,
        _sort_key: &S,
        _response: Response<'_>,
    ) -> OperationContext {
        ctx
    }
}

/// Hooks that do nothing, installed by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl<P, S> StoreHooks<P, S> for NoopHooks {}
