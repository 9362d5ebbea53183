//! Typed store façade over a [`Backend`].

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_dynamo::aws_sdk_dynamodb_1::{from_attribute_value, to_attribute_value};
use tracing::{debug, trace};

use dynastore_core::backend::{
    DeleteItemRequest, GetItemRequest, QueryRequest, UpdateItemRequest,
};
use dynastore_core::{
    decode_last_evaluated_key, encode_last_evaluated_key, Backend, Condition, CursorError,
    DeleteOption, DeleteOptions, FieldsDef, Item, Key, KeyCondition, KeyKind, Operation,
    OperationContext, OperationResult, ReadOption, ReadOptions, Request, Response, Result,
    StoreError, StoreOption, StoreOptions, TextKey, UpdateExpression, WriteOption, WriteOptions,
};

/// A table of records keyed by `(P, S)` holding values of type `V`.
///
/// The store keeps no record state between calls; it can be shared across tasks
/// and used concurrently. Every call takes its own [`OperationContext`] and
/// options.
pub struct Store<P, S, V> {
    backend: Arc<dyn Backend>,
    table_name: String,
    options: StoreOptions<P, S>,
    _value: PhantomData<fn() -> V>,
}

impl<P, S, V> Store<P, S, V>
where
    P: Key,
    S: Key,
    V: Serialize + DeserializeOwned,
{
    /// Creates a store over `table_name`.
    pub fn new(
        backend: Arc<dyn Backend>,
        table_name: impl Into<String>,
        options: impl IntoIterator<Item = StoreOption<P, S>>,
    ) -> Self {
        Self {
            backend,
            table_name: table_name.into(),
            options: StoreOptions::default().apply(options),
            _value: PhantomData,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn fields(&self) -> &FieldsDef {
        &self.options.fields
    }

    /// Creates a record at version 1.
    ///
    /// Fails with the backend's conditional-check error when the record already
    /// exists, unless the create constraint is disabled, in which case the write
    /// behaves as an upsert and increments the stored version.
    pub async fn create(
        &self,
        ctx: &OperationContext,
        partition_key: &P,
        sort_key: &S,
        value: &V,
        options: impl IntoIterator<Item = WriteOption>,
    ) -> Result<OperationResult> {
        let ctx = ctx
            .clone()
            .with_operation(Operation::Create, partition_key, sort_key);
        let opts = WriteOptions::default().apply(options);

        let fields = &self.options.fields;
        let condition = (!opts.create_constraint_disabled).then(|| {
            Condition::attribute_not_exists(&fields.partition_key)
                .and(Condition::attribute_not_exists(&fields.sort_key))
        });

        self.write(ctx, Operation::Create, partition_key, sort_key, value, &opts, condition)
            .await
    }

    /// Reads a record.
    ///
    /// Returns `None` when the record, or its payload attribute, is absent. The
    /// result's version is zero in that case.
    pub async fn get(
        &self,
        ctx: &OperationContext,
        partition_key: &P,
        sort_key: &S,
        options: impl IntoIterator<Item = ReadOption>,
    ) -> Result<(OperationResult, Option<V>)> {
        let ctx = ctx
            .clone()
            .with_operation(Operation::Get, partition_key, sort_key);
        let opts = ReadOptions::default().apply(options);

        debug!(
            table = %self.table_name,
            operation = %Operation::Get,
            partition_key = %partition_key.to_key_string(),
            sort_key = %sort_key.to_key_string(),
            consistent_read = opts.consistent_read,
            "reading record"
        );

        let request = GetItemRequest {
            table_name: self.table_name.clone(),
            key: self.build_key(partition_key, sort_key),
            consistent_read: opts.consistent_read,
        };

        let ctx = self.options.hooks.request_built(
            ctx,
            partition_key,
            sort_key,
            Request::GetItem(&request),
        );
        let response = with_deadline(&ctx, Operation::Get, self.backend.get_item(&request))
            .await?
            .map_err(StoreError::backend("failed to get item"))?;
        self.options.hooks.response_received(
            ctx,
            partition_key,
            sort_key,
            Response::GetItem(&response),
        );

        let item = response.item.unwrap_or_default();
        let version = self.decode_version(&item)?;
        let value = match item.get(&self.options.fields.payload) {
            Some(payload) => Some(
                from_attribute_value(payload.clone())
                    .map_err(StoreError::unmarshal("failed to unmarshal payload"))?,
            ),
            None => None,
        };

        Ok((
            OperationResult {
                version,
                consumed_capacity: response.consumed_capacity,
                last_evaluated_key: None,
            },
            value,
        ))
    }

    /// Replaces the value of an existing record and increments its version.
    ///
    /// With a [`WriteOption::Version`] greater than zero, the update only
    /// succeeds when the stored version equals it. A missing record or a
    /// version mismatch surfaces as the backend's conditional-check error.
    pub async fn update(
        &self,
        ctx: &OperationContext,
        partition_key: &P,
        sort_key: &S,
        value: &V,
        options: impl IntoIterator<Item = WriteOption>,
    ) -> Result<OperationResult> {
        let ctx = ctx
            .clone()
            .with_operation(Operation::Update, partition_key, sort_key);
        let opts = WriteOptions::default().apply(options);

        let fields = &self.options.fields;
        let mut condition = Condition::attribute_exists(&fields.partition_key)
            .and(Condition::attribute_exists(&fields.sort_key));
        if opts.version > 0 {
            condition = condition.and(Condition::equal(
                &fields.version,
                AttributeValue::N(opts.version.to_string()),
            ));
        }

        self.write(
            ctx,
            Operation::Update,
            partition_key,
            sort_key,
            value,
            &opts,
            Some(condition),
        )
        .await
    }

    /// Deletes a record.
    ///
    /// By default the record must exist, otherwise the call fails with
    /// [`StoreError::DeleteFailedKeyNotExists`]. [`DeleteOption::Check`] with
    /// `false` makes the delete unconditional.
    pub async fn delete(
        &self,
        ctx: &OperationContext,
        partition_key: &P,
        sort_key: &S,
        options: impl IntoIterator<Item = DeleteOption>,
    ) -> Result<OperationResult> {
        let ctx = ctx
            .clone()
            .with_operation(Operation::Delete, partition_key, sort_key);
        let opts = DeleteOptions::default().apply(options);

        debug!(
            table = %self.table_name,
            operation = %Operation::Delete,
            partition_key = %partition_key.to_key_string(),
            sort_key = %sort_key.to_key_string(),
            exists_check = opts.exists_check,
            "deleting record"
        );

        let fields = &self.options.fields;
        let condition = opts.exists_check.then(|| {
            Condition::attribute_exists(&fields.partition_key)
                .and(Condition::attribute_exists(&fields.sort_key))
        });

        let request = DeleteItemRequest {
            table_name: self.table_name.clone(),
            key: self.build_key(partition_key, sort_key),
            condition,
        };

        let ctx = self.options.hooks.request_built(
            ctx,
            partition_key,
            sort_key,
            Request::DeleteItem(&request),
        );
        let response =
            match with_deadline(&ctx, Operation::Delete, self.backend.delete_item(&request))
                .await?
            {
                Ok(response) => response,
                Err(err) if err.is_conditional_check_failed() => {
                    return Err(StoreError::DeleteFailedKeyNotExists);
                }
                Err(err) => return Err(StoreError::backend("failed to delete item")(err)),
            };
        self.options.hooks.response_received(
            ctx,
            partition_key,
            sort_key,
            Response::DeleteItem(&response),
        );

        Ok(OperationResult {
            version: 0,
            consumed_capacity: response.consumed_capacity,
            last_evaluated_key: None,
        })
    }

    /// Writes the update clauses shared by create and update.
    #[allow(clippy::too_many_arguments)]
    async fn write(
        &self,
        ctx: OperationContext,
        operation: Operation,
        partition_key: &P,
        sort_key: &S,
        value: &V,
        opts: &WriteOptions,
        condition: Option<Condition>,
    ) -> Result<OperationResult> {
        debug!(
            table = %self.table_name,
            operation = %operation,
            partition_key = %partition_key.to_key_string(),
            sort_key = %sort_key.to_key_string(),
            expected_version = opts.version,
            "writing record"
        );

        let update = self.build_update(value, opts)?;
        trace!(?update, ?condition, "built update expression");

        let request = UpdateItemRequest {
            table_name: self.table_name.clone(),
            key: self.build_key(partition_key, sort_key),
            update,
            condition,
        };

        let ctx = self.options.hooks.request_built(
            ctx,
            partition_key,
            sort_key,
            Request::UpdateItem(&request),
        );
        let response = with_deadline(&ctx, operation, self.backend.update_item(&request))
            .await?
            .map_err(StoreError::backend("failed to update item"))?;
        self.options.hooks.response_received(
            ctx,
            partition_key,
            sort_key,
            Response::UpdateItem(&response),
        );

        let attributes = response.attributes.unwrap_or_default();
        Ok(OperationResult {
            version: self.decode_version(&attributes)?,
            consumed_capacity: response.consumed_capacity,
            last_evaluated_key: None,
        })
    }

    /// Builds the update clauses of a write.
    ///
    /// The reserved-field check runs over every extra field before anything is
    /// marshalled, so a rejected write never reaches the backend.
    fn build_update(&self, value: &V, opts: &WriteOptions) -> Result<UpdateExpression> {
        let fields = &self.options.fields;

        if let Some(field) = opts.extra_fields.keys().find(|name| fields.is_reserved(name)) {
            return Err(StoreError::ReservedField {
                field: field.clone(),
            });
        }

        let payload: AttributeValue =
            to_attribute_value(value).map_err(StoreError::marshal("failed to marshal value"))?;

        let mut update = UpdateExpression::new()
            .add(&fields.version, AttributeValue::N("1".to_string()))
            .set(&fields.payload, payload);

        for (name, extra) in &opts.extra_fields {
            let extra: AttributeValue = to_attribute_value(extra)
                .map_err(StoreError::marshal("failed to marshal extra field"))?;
            update = update.set(name, extra);
        }

        if !opts.ttl.is_zero() {
            let ttl = i64::try_from(opts.ttl.as_secs()).unwrap_or(i64::MAX);
            let expires = Utc::now().timestamp().saturating_add(ttl);
            update = update.set(&fields.expires, AttributeValue::N(expires.to_string()));
        }

        Ok(update)
    }

    fn build_key(&self, partition_key: &P, sort_key: &S) -> Item {
        let fields = &self.options.fields;
        Item::from([
            (
                fields.partition_key.clone(),
                partition_key.to_attribute_value(),
            ),
            (fields.sort_key.clone(), sort_key.to_attribute_value()),
        ])
    }

    fn decode_version(&self, item: &Item) -> Result<i64> {
        match item.get(&self.options.fields.version) {
            Some(version) => from_attribute_value(version.clone())
                .map_err(StoreError::unmarshal("failed to unmarshal version")),
            None => Ok(0),
        }
    }
}

impl<P, S, V> Store<P, S, V>
where
    P: Key,
    S: TextKey,
    V: Serialize + DeserializeOwned,
{
    /// Lists the records of a partition whose sort key starts with `prefix`.
    ///
    /// With [`ReadOption::Index`] the query runs against that secondary index
    /// and its key attributes. The returned result carries a cursor when more
    /// records remain; pass it back with [`ReadOption::LastEvaluatedKey`] to
    /// continue. Expired records that the backend has not reaped yet are
    /// included.
    ///
    /// Cursors only carry text attributes, so a limited listing over a
    /// numeric or binary partition key is rejected before the backend is
    /// called.
    pub async fn list_by_sort_key_prefix(
        &self,
        ctx: &OperationContext,
        partition_key: &P,
        prefix: &str,
        options: impl IntoIterator<Item = ReadOption>,
    ) -> Result<(OperationResult, Vec<V>)> {
        let sort_key = S::from_text(prefix);
        let ctx = ctx
            .clone()
            .with_operation(Operation::ListBySortKeyPrefix, partition_key, &sort_key);
        let opts = ReadOptions::default().apply(options);

        let fields = &self.options.fields;
        let (index_name, partition_attribute, sort_attribute) = match &opts.index {
            Some(index) => (
                Some(index.name.clone()),
                index.partition_key.clone(),
                index.sort_key.clone(),
            ),
            None => (None, fields.partition_key.clone(), fields.sort_key.clone()),
        };

        debug!(
            table = %self.table_name,
            operation = %Operation::ListBySortKeyPrefix,
            partition_key = %partition_key.to_key_string(),
            prefix,
            index = index_name.as_deref().unwrap_or_default(),
            "listing records"
        );

        let limit = opts.limit.filter(|limit| *limit > 0);
        if limit.is_some() && P::KIND != KeyKind::Text {
            return Err(CursorError::UnsupportedAttribute {
                name: partition_attribute,
            }
            .into());
        }

        let exclusive_start_key = match opts.last_evaluated_key.as_deref() {
            Some(cursor) if !cursor.is_empty() => Some(decode_last_evaluated_key(cursor)?),
            _ => None,
        };

        let request = QueryRequest {
            table_name: self.table_name.clone(),
            index_name,
            key_condition: KeyCondition {
                partition_key: partition_attribute,
                partition_value: partition_key.to_attribute_value(),
                sort_key: sort_attribute,
                sort_prefix: prefix.to_string(),
            },
            limit,
            exclusive_start_key,
            consistent_read: opts.consistent_read,
        };
        trace!(key_condition = ?request.key_condition, "built key condition");

        let ctx = self.options.hooks.request_built(
            ctx,
            partition_key,
            &sort_key,
            Request::Query(&request),
        );
        let response = with_deadline(
            &ctx,
            Operation::ListBySortKeyPrefix,
            self.backend.query(&request),
        )
        .await?
        .map_err(StoreError::backend("failed to query items"))?;
        self.options.hooks.response_received(
            ctx,
            partition_key,
            &sort_key,
            Response::Query(&response),
        );

        // A record without a payload decodes from NULL, so `V = Option<T>`
        // yields `None` and any other value type fails to unmarshal.
        let mut values = Vec::with_capacity(response.items.len());
        for item in &response.items {
            let payload = item
                .get(&fields.payload)
                .cloned()
                .unwrap_or(AttributeValue::Null(true));
            values.push(
                from_attribute_value(payload)
                    .map_err(StoreError::unmarshal("failed to unmarshal payload"))?,
            );
        }

        let cursor = encode_last_evaluated_key(response.last_evaluated_key.as_ref())?;

        Ok((
            OperationResult {
                version: 0,
                consumed_capacity: response.consumed_capacity,
                last_evaluated_key: (!cursor.is_empty()).then_some(cursor),
            },
            values,
        ))
    }
}

impl<P, S, V> std::fmt::Debug for Store<P, S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("table_name", &self.table_name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Bounds `future` by the context deadline, if one is set.
async fn with_deadline<F>(
    ctx: &OperationContext,
    operation: Operation,
    future: F,
) -> Result<F::Output>
where
    F: Future,
{
    match ctx.remaining() {
        Some(remaining) => tokio::time::timeout(remaining, future)
            .await
            .map_err(|_| StoreError::DeadlineExceeded { operation }),
        None => Ok(future.await),
    }
}
