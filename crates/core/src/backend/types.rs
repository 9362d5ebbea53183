use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::expression::{Condition, KeyCondition, UpdateExpression};
use crate::result::ConsumedCapacity;

/// Attribute map of a stored item, or of a key.
pub type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct GetItemRequest {
    pub table_name: String,
    pub key: Item,
    pub consistent_read: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetItemResponse {
    pub item: Option<Item>,
    pub consumed_capacity: Option<ConsumedCapacity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateItemRequest {
    pub table_name: String,
    pub key: Item,
    pub update: UpdateExpression,
    pub condition: Option<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateItemResponse {
    /// All attributes of the item after the update.
    pub attributes: Option<Item>,
    pub consumed_capacity: Option<ConsumedCapacity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteItemRequest {
    pub table_name: String,
    pub key: Item,
    pub condition: Option<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteItemResponse {
    pub consumed_capacity: Option<ConsumedCapacity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub table_name: String,
    /// Secondary index to query instead of the primary key schema.
    pub index_name: Option<String>,
    pub key_condition: KeyCondition,
    pub limit: Option<i32>,
    pub exclusive_start_key: Option<Item>,
    pub consistent_read: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    pub items: Vec<Item>,
    /// Resume point when the result was truncated.
    pub last_evaluated_key: Option<Item>,
    pub consumed_capacity: Option<ConsumedCapacity>,
}
