//! DynamoDB backend implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{ReturnConsumedCapacity, ReturnValue};
use aws_sdk_dynamodb::Client;
use tracing::trace;

use dynastore_core::backend::{
    DeleteItemRequest, DeleteItemResponse, GetItemRequest, GetItemResponse, QueryRequest,
    QueryResponse, UpdateItemRequest, UpdateItemResponse,
};
use dynastore_core::{Backend, BackendError};

use super::conversions::consumed_capacity;
use super::error::{
    map_delete_item_error, map_get_item_error, map_query_error, map_update_item_error,
};
use super::expression::ExpressionBuilder;
use crate::config::StoreConfig;

/// DynamoDB-based backend.
///
/// Retry and backoff follow the SDK client's configuration.
#[derive(Debug, Clone)]
pub struct DynamoDbBackend {
    client: Client,
}

impl DynamoDbBackend {
    /// Creates a backend with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a backend from store configuration.
    ///
    /// Uses the AWS SDK default credential chain with the configured region and,
    /// when set, the endpoint override.
    pub async fn from_config(config: &StoreConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        Self::new(Client::new(&loader.load().await))
    }

    /// Get the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Backend for DynamoDbBackend {
    async fn get_item(&self, request: &GetItemRequest) -> Result<GetItemResponse, BackendError> {
        let result = self
            .client
            .get_item()
            .table_name(&request.table_name)
            .set_key(Some(request.key.clone()))
            .set_consistent_read(request.consistent_read.then_some(true))
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(GetItemResponse {
            consumed_capacity: consumed_capacity(result.consumed_capacity()),
            item: result.item,
        })
    }

    async fn update_item(
        &self,
        request: &UpdateItemRequest,
    ) -> Result<UpdateItemResponse, BackendError> {
        let mut builder = ExpressionBuilder::new();
        let update_expression = builder.update(&request.update);
        let condition_expression = request
            .condition
            .as_ref()
            .map(|condition| builder.condition(condition));
        let (names, values) = builder.build();

        trace!(
            update_expression = %update_expression,
            condition_expression = condition_expression.as_deref().unwrap_or_default(),
            "rendered update"
        );

        let result = self
            .client
            .update_item()
            .table_name(&request.table_name)
            .set_key(Some(request.key.clone()))
            .update_expression(update_expression)
            .set_condition_expression(condition_expression)
            .set_expression_attribute_names(names)
            .set_expression_attribute_values(values)
            .return_values(ReturnValue::AllNew)
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(map_update_item_error)?;

        Ok(UpdateItemResponse {
            consumed_capacity: consumed_capacity(result.consumed_capacity()),
            attributes: result.attributes,
        })
    }

    async fn delete_item(
        &self,
        request: &DeleteItemRequest,
    ) -> Result<DeleteItemResponse, BackendError> {
        let mut builder = ExpressionBuilder::new();
        let condition_expression = request
            .condition
            .as_ref()
            .map(|condition| builder.condition(condition));
        let (names, values) = builder.build();

        let result = self
            .client
            .delete_item()
            .table_name(&request.table_name)
            .set_key(Some(request.key.clone()))
            .set_condition_expression(condition_expression)
            .set_expression_attribute_names(names)
            .set_expression_attribute_values(values)
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(DeleteItemResponse {
            consumed_capacity: consumed_capacity(result.consumed_capacity()),
        })
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError> {
        let mut builder = ExpressionBuilder::new();
        let key_condition_expression = builder.key_condition(&request.key_condition);
        let (names, values) = builder.build();

        trace!(key_condition_expression = %key_condition_expression, "rendered query");

        let result = self
            .client
            .query()
            .table_name(&request.table_name)
            .set_index_name(request.index_name.clone())
            .key_condition_expression(key_condition_expression)
            .set_expression_attribute_names(names)
            .set_expression_attribute_values(values)
            .set_limit(request.limit)
            .set_exclusive_start_key(request.exclusive_start_key.clone())
            .set_consistent_read(request.consistent_read.then_some(true))
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(map_query_error)?;

        Ok(QueryResponse {
            consumed_capacity: consumed_capacity(result.consumed_capacity()),
            items: result.items.unwrap_or_default(),
            last_evaluated_key: result.last_evaluated_key.filter(|key| !key.is_empty()),
        })
    }
}
