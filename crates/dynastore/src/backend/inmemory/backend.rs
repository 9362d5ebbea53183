//! In-memory backend implementation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tokio::sync::RwLock;

use dynastore_core::backend::{
    DeleteItemRequest, DeleteItemResponse, GetItemRequest, GetItemResponse, QueryRequest,
    QueryResponse, UpdateItemRequest, UpdateItemResponse,
};
use dynastore_core::{Backend, BackendError, Item};

const CONDITIONAL_REQUEST_FAILED: &str = "The conditional request failed";

/// Items of one table, keyed by their primary key.
#[derive(Debug, Default)]
struct Table {
    /// Primary key attribute names, learned from the first write.
    key_names: Vec<String>,
    items: HashMap<String, Item>,
}

impl Table {
    fn learn_key_names(&mut self, key: &Item) {
        if self.key_names.is_empty() {
            let mut names: Vec<String> = key.keys().cloned().collect();
            names.sort();
            self.key_names = names;
        }
    }

    /// Canonical identity of an item or key over the table's key attributes.
    fn identity(&self, item: &Item) -> String {
        identity(&self.key_names, item)
    }
}

fn identity(names: &[String], item: &Item) -> String {
    names
        .iter()
        .map(|name| format!("{name}={:?}", item.get(name)))
        .collect::<Vec<_>>()
        .join("|")
}

fn key_identity(key: &Item) -> String {
    let mut names: Vec<String> = key.keys().cloned().collect();
    names.sort();
    identity(&names, key)
}

/// Orders sort key values, numbers by value.
fn compare_values(a: Option<&AttributeValue>, b: Option<&AttributeValue>) -> Ordering {
    match (a, b) {
        (Some(AttributeValue::S(a)), Some(AttributeValue::S(b))) => a.cmp(b),
        (Some(AttributeValue::N(a)), Some(AttributeValue::N(b))) => {
            match (a.parse::<f64>(), b.parse::<f64>()) {
                (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                _ => a.cmp(b),
            }
        }
        (Some(AttributeValue::B(a)), Some(AttributeValue::B(b))) => {
            a.as_ref().cmp(b.as_ref())
        }
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

/// In-memory backend for testing.
///
/// Evaluates conditions and update expressions the way DynamoDB does for the
/// subset the store emits. Tables are created on first write. Expired items are
/// never removed.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of items stored in `table_name`.
    pub async fn item_count(&self, table_name: &str) -> usize {
        let tables = self.tables.read().await;
        tables.get(table_name).map_or(0, |table| table.items.len())
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn get_item(&self, request: &GetItemRequest) -> Result<GetItemResponse, BackendError> {
        let tables = self.tables.read().await;
        let item = tables
            .get(&request.table_name)
            .and_then(|table| table.items.get(&key_identity(&request.key)))
            .cloned();

        Ok(GetItemResponse {
            item,
            consumed_capacity: None,
        })
    }

    async fn update_item(
        &self,
        request: &UpdateItemRequest,
    ) -> Result<UpdateItemResponse, BackendError> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(request.table_name.clone()).or_default();
        table.learn_key_names(&request.key);

        let id = key_identity(&request.key);
        let existing = table.items.get(&id);

        if let Some(condition) = &request.condition {
            if !condition.evaluate(existing) {
                return Err(BackendError::ConditionalCheckFailed(
                    CONDITIONAL_REQUEST_FAILED.to_string(),
                ));
            }
        }

        let mut item = existing.cloned().unwrap_or_else(|| request.key.clone());
        request.update.apply(&mut item)?;
        table.items.insert(id, item.clone());

        Ok(UpdateItemResponse {
            attributes: Some(item),
            consumed_capacity: None,
        })
    }

    async fn delete_item(
        &self,
        request: &DeleteItemRequest,
    ) -> Result<DeleteItemResponse, BackendError> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(request.table_name.clone()).or_default();

        let id = key_identity(&request.key);
        if let Some(condition) = &request.condition {
            if !condition.evaluate(table.items.get(&id)) {
                return Err(BackendError::ConditionalCheckFailed(
                    CONDITIONAL_REQUEST_FAILED.to_string(),
                ));
            }
        }

        table.items.remove(&id);

        Ok(DeleteItemResponse {
            consumed_capacity: None,
        })
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BackendError> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(&request.table_name) else {
            return Ok(QueryResponse::default());
        };

        let condition = &request.key_condition;
        let mut matched: Vec<(String, &Item)> = table
            .items
            .values()
            .filter(|item| item.get(&condition.partition_key) == Some(&condition.partition_value))
            .filter(|item| {
                matches!(
                    item.get(&condition.sort_key),
                    Some(AttributeValue::S(sort)) if sort.starts_with(&condition.sort_prefix)
                )
            })
            .map(|item| (table.identity(item), item))
            .collect();

        matched.sort_by(|(a_id, a), (b_id, b)| {
            compare_values(a.get(&condition.sort_key), b.get(&condition.sort_key))
                .then_with(|| a_id.cmp(b_id))
        });

        let start = match &request.exclusive_start_key {
            Some(start) if !start.is_empty() => {
                let start_id = table.identity(start);
                let start_sort = start.get(&condition.sort_key);
                matched
                    .iter()
                    .position(|(id, item)| {
                        compare_values(item.get(&condition.sort_key), start_sort)
                            .then_with(|| id.cmp(&start_id))
                            == Ordering::Greater
                    })
                    .unwrap_or(matched.len())
            }
            _ => 0,
        };

        let remaining = &matched[start..];
        let limit = request
            .limit
            .and_then(|limit| usize::try_from(limit).ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(remaining.len());
        let page = &remaining[..limit.min(remaining.len())];

        let last_evaluated_key = if page.len() < remaining.len() {
            page.last().map(|(_, item)| {
                table
                    .key_names
                    .iter()
                    .chain([&condition.partition_key, &condition.sort_key])
                    .filter_map(|name| item.get(name).map(|v| (name.clone(), v.clone())))
                    .collect::<Item>()
            })
        } else {
            None
        };

        Ok(QueryResponse {
            items: page.iter().map(|(_, item)| (*item).clone()).collect(),
            last_evaluated_key,
            consumed_capacity: None,
        })
    }
}
