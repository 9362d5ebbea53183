//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `BackendError` from `dynastore_core`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use dynastore_core::BackendError;

fn message(message: Option<&str>, fallback: &str) -> String {
    message.unwrap_or(fallback).to_string()
}

/// Map a GetItem SDK error to BackendError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> BackendError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(e) => {
            BackendError::ResourceNotFound(message(e.message(), "Table not found"))
        }
        GetItemError::ProvisionedThroughputExceededException(e) => {
            BackendError::Throttled(message(e.message(), "Throughput exceeded, please retry"))
        }
        GetItemError::RequestLimitExceeded(e) => {
            BackendError::Throttled(message(e.message(), "Request limit exceeded, please retry"))
        }
        err => BackendError::Service(Box::new(err)),
    }
}

/// Map a Query SDK error to BackendError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> BackendError {
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(e) => {
            BackendError::ResourceNotFound(message(e.message(), "Table or index not found"))
        }
        QueryError::ProvisionedThroughputExceededException(e) => {
            BackendError::Throttled(message(e.message(), "Throughput exceeded, please retry"))
        }
        QueryError::RequestLimitExceeded(e) => {
            BackendError::Throttled(message(e.message(), "Request limit exceeded, please retry"))
        }
        err => BackendError::Service(Box::new(err)),
    }
}

/// Map an UpdateItem SDK error to BackendError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
) -> BackendError {
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(e) => BackendError::ConditionalCheckFailed(
            message(e.message(), "The conditional request failed"),
        ),
        UpdateItemError::ResourceNotFoundException(e) => {
            BackendError::ResourceNotFound(message(e.message(), "Table not found"))
        }
        UpdateItemError::ProvisionedThroughputExceededException(e) => {
            BackendError::Throttled(message(e.message(), "Throughput exceeded, please retry"))
        }
        UpdateItemError::RequestLimitExceeded(e) => {
            BackendError::Throttled(message(e.message(), "Request limit exceeded, please retry"))
        }
        UpdateItemError::TransactionConflictException(e) => BackendError::Throttled(message(
            e.message(),
            "Transaction conflict, please retry",
        )),
        UpdateItemError::ItemCollectionSizeLimitExceededException(e) => {
            BackendError::InvalidRequest(message(
                e.message(),
                "Item collection size limit exceeded",
            ))
        }
        err => BackendError::Service(Box::new(err)),
    }
}

/// Map a DeleteItem SDK error to BackendError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> BackendError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(e) => BackendError::ConditionalCheckFailed(
            message(e.message(), "The conditional request failed"),
        ),
        DeleteItemError::ResourceNotFoundException(e) => {
            BackendError::ResourceNotFound(message(e.message(), "Table not found"))
        }
        DeleteItemError::ProvisionedThroughputExceededException(e) => {
            BackendError::Throttled(message(e.message(), "Throughput exceeded, please retry"))
        }
        DeleteItemError::RequestLimitExceeded(e) => {
            BackendError::Throttled(message(e.message(), "Request limit exceeded, please retry"))
        }
        DeleteItemError::TransactionConflictException(e) => BackendError::Throttled(message(
            e.message(),
            "Transaction conflict, please retry",
        )),
        DeleteItemError::ItemCollectionSizeLimitExceededException(e) => {
            BackendError::InvalidRequest(message(
                e.message(),
                "Item collection size limit exceeded",
            ))
        }
        err => BackendError::Service(Box::new(err)),
    }
}
