//! Store behaviour against the in-memory backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use serde_json::json;

use dynastore::backend::InMemoryBackend;
use dynastore::{
    Backend, BackendError, CursorError, DeleteOption, FieldsDef, Item, Key, Operation,
    OperationContext, OperationDetails, ReadOption, Request, Response, Store, StoreError,
    StoreHooks, StoreOption, UpdateExpression, WriteOption,
};
use dynastore_core::backend::{
    DeleteItemRequest, DeleteItemResponse, GetItemRequest, GetItemResponse, QueryRequest,
    QueryResponse, UpdateItemRequest, UpdateItemResponse,
};

const TABLE: &str = "dynastore";

fn store() -> (InMemoryBackend, Store<String, String, Vec<u8>>) {
    let backend = InMemoryBackend::new();
    let store = Store::new(Arc::new(backend.clone()), TABLE, []);
    (backend, store)
}

fn k(value: &str) -> String {
    value.to_string()
}

/// Reads the stored attributes of a record straight from the backend.
async fn raw_item(backend: &InMemoryBackend, key: [(&str, &str); 2]) -> Item {
    let request = GetItemRequest {
        table_name: TABLE.to_string(),
        key: key
            .into_iter()
            .map(|(name, value)| (name.to_string(), AttributeValue::S(value.to_string())))
            .collect(),
        consistent_read: true,
    };
    let response = backend.get_item(&request).await.unwrap();
    response.item.unwrap()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Customer {
    name: String,
    tier: u32,
}

// ==================== Create ====================

#[tokio::test]
async fn test_create_scenario() {
    let (_, store) = store();
    let ctx = OperationContext::new();
    let ttl = [WriteOption::ttl(Duration::from_secs(10))];

    let result = store
        .create(&ctx, &k("A"), &k("s1"), &b"data".to_vec(), ttl.clone())
        .await
        .unwrap();
    assert_eq!(result.version, 1);

    let err = store
        .create(&ctx, &k("A"), &k("s1"), &b"data".to_vec(), ttl.clone())
        .await
        .unwrap_err();
    assert!(err.is_conditional_check_failed());

    let result = store
        .create(
            &ctx,
            &k("A"),
            &k("s1"),
            &b"data".to_vec(),
            [
                WriteOption::ttl(Duration::from_secs(10)),
                WriteOption::create_constraint_disabled(true),
            ],
        )
        .await
        .unwrap();
    assert_eq!(result.version, 2);
}

#[tokio::test]
async fn test_create_then_get() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    store
        .create(&ctx, &k("A"), &k("s1"), &b"data".to_vec(), [])
        .await
        .unwrap();

    let (result, value) = store.get(&ctx, &k("A"), &k("s1"), []).await.unwrap();
    assert_eq!(value, Some(b"data".to_vec()));
    assert_eq!(result.version, 1);
    assert!(result.last_evaluated_key.is_none());
}

#[tokio::test]
async fn test_create_sets_absolute_expiry() {
    let (backend, store) = store();
    let ctx = OperationContext::new();
    let before = chrono::Utc::now().timestamp();

    store
        .create(
            &ctx,
            &k("A"),
            &k("s1"),
            &b"data".to_vec(),
            [WriteOption::ttl(Duration::from_secs(10))],
        )
        .await
        .unwrap();
    store
        .create(&ctx, &k("A"), &k("s2"), &b"data".to_vec(), [])
        .await
        .unwrap();

    let item = raw_item(&backend, [("id", "A"), ("name", "s1")]).await;
    let Some(AttributeValue::N(expires)) = item.get("expires") else {
        panic!("expires attribute missing");
    };
    assert!(expires.parse::<i64>().unwrap() >= before + 10);

    let item = raw_item(&backend, [("id", "A"), ("name", "s2")]).await;
    assert!(!item.contains_key("expires"));
}

#[tokio::test]
async fn test_create_with_extra_fields() {
    let (backend, store) = store();
    let ctx = OperationContext::new();

    store
        .create(
            &ctx,
            &k("A"),
            &k("s1"),
            &b"data".to_vec(),
            [WriteOption::extra_fields([("created", json!("20250101"))])],
        )
        .await
        .unwrap();

    let item = raw_item(&backend, [("id", "A"), ("name", "s1")]).await;
    assert_eq!(
        item.get("created"),
        Some(&AttributeValue::S("20250101".to_string()))
    );
}

#[tokio::test]
async fn test_reserved_extra_fields_are_rejected_before_writing() {
    let (backend, store) = store();
    let ctx = OperationContext::new();

    for name in ["id", "name", "expires", "version", "payload"] {
        let err = store
            .create(
                &ctx,
                &k("A"),
                &k("s1"),
                &b"data".to_vec(),
                [WriteOption::extra_fields([(name, json!("x"))])],
            )
            .await
            .unwrap_err();
        assert!(
            matches!(&err, StoreError::ReservedField { field } if field == name),
            "{name}: {err}"
        );
    }
    assert_eq!(backend.item_count(TABLE).await, 0);

    store
        .create(&ctx, &k("A"), &k("s1"), &b"data".to_vec(), [])
        .await
        .unwrap();
    let err = store
        .update(
            &ctx,
            &k("A"),
            &k("s1"),
            &b"changed".to_vec(),
            [WriteOption::extra_fields([("version", json!(10))])],
        )
        .await
        .unwrap_err();
    assert!(err.is_reserved_field());

    let (result, value) = store.get(&ctx, &k("A"), &k("s1"), []).await.unwrap();
    assert_eq!(result.version, 1);
    assert_eq!(value, Some(b"data".to_vec()));
}

// ==================== Get ====================

#[tokio::test]
async fn test_get_missing_record() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    let (result, value) = store
        .get(&ctx, &k("A"), &k("missing"), [ReadOption::consistent_read(true)])
        .await
        .unwrap();
    assert_eq!(value, None);
    assert_eq!(result.version, 0);
}

#[tokio::test]
async fn test_get_structured_value() {
    let backend = InMemoryBackend::new();
    let store: Store<String, u64, Customer> = Store::new(Arc::new(backend), TABLE, []);
    let ctx = OperationContext::new();
    let customer = Customer {
        name: "Ada".to_string(),
        tier: 3,
    };

    store.create(&ctx, &k("C"), &7, &customer, []).await.unwrap();

    let (_, value) = store.get(&ctx, &k("C"), &7, []).await.unwrap();
    assert_eq!(value, Some(customer));
}

#[tokio::test]
async fn test_get_wrong_payload_type_fails_to_unmarshal() {
    let backend = InMemoryBackend::new();
    let writer: Store<String, String, String> =
        Store::new(Arc::new(backend.clone()), TABLE, []);
    let reader: Store<String, String, Customer> = Store::new(Arc::new(backend), TABLE, []);
    let ctx = OperationContext::new();

    writer
        .create(&ctx, &k("A"), &k("s1"), &k("text"), [])
        .await
        .unwrap();

    let err = reader.get(&ctx, &k("A"), &k("s1"), []).await.unwrap_err();
    assert!(matches!(err, StoreError::Unmarshal { .. }));
}

// ==================== Update ====================

#[tokio::test]
async fn test_update_increments_version() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    store
        .create(&ctx, &k("A"), &k("s1"), &b"v1".to_vec(), [])
        .await
        .unwrap();

    for expected in 2..=4 {
        let result = store
            .update(&ctx, &k("A"), &k("s1"), &b"same".to_vec(), [])
            .await
            .unwrap();
        assert_eq!(result.version, expected);
    }

    let (result, value) = store.get(&ctx, &k("A"), &k("s1"), []).await.unwrap();
    assert_eq!(result.version, 4);
    assert_eq!(value, Some(b"same".to_vec()));
}

#[tokio::test]
async fn test_update_with_expected_version() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    store
        .create(&ctx, &k("A"), &k("s1"), &b"v1".to_vec(), [])
        .await
        .unwrap();

    let result = store
        .update(
            &ctx,
            &k("A"),
            &k("s1"),
            &b"v2".to_vec(),
            [WriteOption::version(1)],
        )
        .await
        .unwrap();
    assert_eq!(result.version, 2);

    for stale in [1, 3, 42] {
        let err = store
            .update(
                &ctx,
                &k("A"),
                &k("s1"),
                &b"v3".to_vec(),
                [WriteOption::version(stale)],
            )
            .await
            .unwrap_err();
        assert!(err.is_conditional_check_failed(), "version {stale}");
    }

    let (result, value) = store.get(&ctx, &k("A"), &k("s1"), []).await.unwrap();
    assert_eq!(result.version, 2);
    assert_eq!(value, Some(b"v2".to_vec()));
}

#[tokio::test]
async fn test_update_missing_record_fails() {
    let (backend, store) = store();
    let ctx = OperationContext::new();

    let err = store
        .update(&ctx, &k("A"), &k("missing"), &b"data".to_vec(), [])
        .await
        .unwrap_err();

    assert!(err.is_conditional_check_failed());
    assert!(matches!(
        err.backend_error(),
        Some(BackendError::ConditionalCheckFailed(_))
    ));
    assert_eq!(backend.item_count(TABLE).await, 0);
}

// ==================== Delete ====================

#[tokio::test]
async fn test_delete_existing_record() {
    let (backend, store) = store();
    let ctx = OperationContext::new();

    store
        .create(&ctx, &k("A"), &k("s1"), &b"data".to_vec(), [])
        .await
        .unwrap();
    store.delete(&ctx, &k("A"), &k("s1"), []).await.unwrap();

    assert_eq!(backend.item_count(TABLE).await, 0);
    let (_, value) = store.get(&ctx, &k("A"), &k("s1"), []).await.unwrap();
    assert_eq!(value, None);
}

#[tokio::test]
async fn test_delete_missing_record() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    let err = store
        .delete(&ctx, &k("A"), &k("missing"), [])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DeleteFailedKeyNotExists));
    assert!(!err.is_conditional_check_failed());

    store
        .delete(&ctx, &k("A"), &k("missing"), [DeleteOption::check(false)])
        .await
        .unwrap();
}

// ==================== List ====================

#[tokio::test]
async fn test_list_by_prefix_scenario() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    store
        .create(&ctx, &k("P"), &k("cust/1"), &b"one".to_vec(), [])
        .await
        .unwrap();
    store
        .create(&ctx, &k("P"), &k("cust/2"), &b"two".to_vec(), [])
        .await
        .unwrap();
    store
        .create(&ctx, &k("P"), &k("order/1"), &b"order".to_vec(), [])
        .await
        .unwrap();

    let (result, mut values) = store
        .list_by_sort_key_prefix(&ctx, &k("P"), "cust", [])
        .await
        .unwrap();
    values.sort();

    assert_eq!(values, vec![b"one".to_vec(), b"two".to_vec()]);
    assert!(result.last_evaluated_key.is_none());
    assert!(!result.has_more());
}

#[tokio::test]
async fn test_list_with_limit_and_cursor() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    for n in 1..=5 {
        store
            .create(&ctx, &k("P"), &format!("cust/{n}"), &vec![n as u8], [])
            .await
            .unwrap();
    }

    let (first, page) = store
        .list_by_sort_key_prefix(&ctx, &k("P"), "cust", [ReadOption::limit(3)])
        .await
        .unwrap();
    assert_eq!(page, vec![vec![1], vec![2], vec![3]]);
    let cursor = first.last_evaluated_key.unwrap();
    assert!(!cursor.is_empty());

    let (second, page) = store
        .list_by_sort_key_prefix(
            &ctx,
            &k("P"),
            "cust",
            [ReadOption::limit(3), ReadOption::last_evaluated_key(cursor)],
        )
        .await
        .unwrap();
    assert_eq!(page, vec![vec![4], vec![5]]);
    assert!(second.last_evaluated_key.is_none());
}

#[tokio::test]
async fn test_list_ignores_empty_cursor_and_non_positive_limit() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    for n in 1..=3 {
        store
            .create(&ctx, &k("P"), &format!("a{n}"), &vec![n as u8], [])
            .await
            .unwrap();
    }

    let (result, values) = store
        .list_by_sort_key_prefix(
            &ctx,
            &k("P"),
            "a",
            [ReadOption::limit(0), ReadOption::last_evaluated_key("")],
        )
        .await
        .unwrap();
    assert_eq!(values.len(), 3);
    assert!(result.last_evaluated_key.is_none());
}

#[tokio::test]
async fn test_list_rejects_garbage_cursor() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    let err = store
        .list_by_sort_key_prefix(
            &ctx,
            &k("P"),
            "a",
            [ReadOption::last_evaluated_key("not base64!")],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Cursor(_)));
}

/// Writes a record that only carries a version, with no payload attribute.
async fn write_without_payload(backend: &InMemoryBackend, partition: &str, sort: &str) {
    let request = UpdateItemRequest {
        table_name: TABLE.to_string(),
        key: [
            ("id".to_string(), AttributeValue::S(partition.to_string())),
            ("name".to_string(), AttributeValue::S(sort.to_string())),
        ]
        .into_iter()
        .collect(),
        update: UpdateExpression::new().add("version", AttributeValue::N("1".to_string())),
        condition: None,
    };
    backend.update_item(&request).await.unwrap();
}

#[tokio::test]
async fn test_list_record_without_payload_fails_to_unmarshal() {
    let backend = InMemoryBackend::new();
    let store: Store<String, String, String> = Store::new(Arc::new(backend.clone()), TABLE, []);
    let ctx = OperationContext::new();

    store
        .create(&ctx, &k("P"), &k("a1"), &k("one"), [])
        .await
        .unwrap();
    write_without_payload(&backend, "P", "a2").await;
    store
        .create(&ctx, &k("P"), &k("a3"), &k("three"), [])
        .await
        .unwrap();

    let err = store
        .list_by_sort_key_prefix(&ctx, &k("P"), "a", [ReadOption::limit(2)])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Unmarshal { .. }));
}

#[tokio::test]
async fn test_list_optional_values_keep_records_without_payload() {
    let backend = InMemoryBackend::new();
    let writer: Store<String, String, String> =
        Store::new(Arc::new(backend.clone()), TABLE, []);
    let reader: Store<String, String, Option<String>> =
        Store::new(Arc::new(backend.clone()), TABLE, []);
    let ctx = OperationContext::new();

    writer
        .create(&ctx, &k("P"), &k("a1"), &k("one"), [])
        .await
        .unwrap();
    write_without_payload(&backend, "P", "a2").await;
    writer
        .create(&ctx, &k("P"), &k("a3"), &k("three"), [])
        .await
        .unwrap();

    let (first, page) = reader
        .list_by_sort_key_prefix(&ctx, &k("P"), "a", [ReadOption::limit(2)])
        .await
        .unwrap();
    assert_eq!(page, vec![Some(k("one")), None]);
    let cursor = first.last_evaluated_key.unwrap();

    let (second, page) = reader
        .list_by_sort_key_prefix(
            &ctx,
            &k("P"),
            "a",
            [ReadOption::limit(2), ReadOption::last_evaluated_key(cursor)],
        )
        .await
        .unwrap();
    assert_eq!(page, vec![Some(k("three"))]);
    assert!(second.last_evaluated_key.is_none());
}

#[tokio::test]
async fn test_list_with_limit_rejects_numeric_partition_key() {
    let backend = InMemoryBackend::new();
    let store: Store<u64, String, String> = Store::new(Arc::new(backend.clone()), TABLE, []);
    let ctx = OperationContext::new();

    for n in 1..=3 {
        store
            .create(&ctx, &7, &format!("a{n}"), &format!("v{n}"), [])
            .await
            .unwrap();
    }

    let err = store
        .list_by_sort_key_prefix(&ctx, &7, "a", [ReadOption::limit(2)])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Cursor(CursorError::UnsupportedAttribute { ref name }) if name == "id"
    ));

    let (result, values) = store
        .list_by_sort_key_prefix(&ctx, &7, "a", [])
        .await
        .unwrap();
    assert_eq!(values, vec![k("v1"), k("v2"), k("v3")]);
    assert!(result.last_evaluated_key.is_none());
}

#[tokio::test]
async fn test_list_through_secondary_index() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    for (sort, group) in [("a", "g1"), ("b", "g1"), ("c", "g2")] {
        store
            .create(
                &ctx,
                &k("P"),
                &k(sort),
                &sort.as_bytes().to_vec(),
                [WriteOption::extra_fields([
                    ("pk1", json!(group)),
                    ("sk1", json!(format!("item/{sort}"))),
                ])],
            )
            .await
            .unwrap();
    }

    let index = ReadOption::index("idx_global_1", "pk1", "sk1");
    let (first, page) = store
        .list_by_sort_key_prefix(&ctx, &k("g1"), "item/", [index.clone(), ReadOption::limit(1)])
        .await
        .unwrap();
    assert_eq!(page, vec![b"a".to_vec()]);

    let (second, page) = store
        .list_by_sort_key_prefix(
            &ctx,
            &k("g1"),
            "item/",
            [
                index,
                ReadOption::limit(1),
                ReadOption::last_evaluated_key(first.last_evaluated_key.unwrap()),
            ],
        )
        .await
        .unwrap();
    assert_eq!(page, vec![b"b".to_vec()]);
    assert!(second.last_evaluated_key.is_none());
}

#[tokio::test]
async fn test_list_includes_expired_records() {
    let (_, store) = store();
    let ctx = OperationContext::new();

    store
        .create(
            &ctx,
            &k("P"),
            &k("x1"),
            &b"gone".to_vec(),
            [WriteOption::ttl(Duration::from_secs(1))],
        )
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (_, values) = store
        .list_by_sort_key_prefix(&ctx, &k("P"), "x", [])
        .await
        .unwrap();
    assert_eq!(values, vec![b"gone".to_vec()]);
}

// ==================== Options and hooks ====================

#[tokio::test]
async fn test_custom_field_names() {
    let backend = InMemoryBackend::new();
    let fields = FieldsDef::default()
        .with_partition_key("PK")
        .with_sort_key("SK")
        .with_payload("data");
    let store: Store<String, String, Vec<u8>> = Store::new(
        Arc::new(backend.clone()),
        TABLE,
        [StoreOption::fields(fields)],
    );
    let ctx = OperationContext::new();

    store
        .create(&ctx, &k("A"), &k("s1"), &b"data".to_vec(), [])
        .await
        .unwrap();

    let item = raw_item(&backend, [("PK", "A"), ("SK", "s1")]).await;
    assert!(item.contains_key("data"));
    assert!(!item.contains_key("payload"));

    let err = store
        .update(
            &ctx,
            &k("A"),
            &k("s1"),
            &b"data".to_vec(),
            [WriteOption::extra_fields([("data", json!(1))])],
        )
        .await
        .unwrap_err();
    assert!(err.is_reserved_field());
}

#[derive(Default)]
struct RecordingHooks {
    events: Mutex<Vec<(&'static str, OperationDetails, Option<String>)>>,
}

impl<P: Key, S: Key> StoreHooks<P, S> for RecordingHooks {
    fn request_built(
        &self,
        ctx: OperationContext,
        _partition_key: &P,
        _sort_key: &S,
        _request: Request<'_>,
    ) -> OperationContext {
        if let Some(details) = ctx.operation_details() {
            self.events
                .lock()
                .unwrap()
                .push(("request", details.clone(), None));
        }
        ctx.with_annotation("seen", "request")
    }

    fn response_received(
        &self,
        ctx: OperationContext,
        _partition_key: &P,
        _sort_key: &S,
        _response: Response<'_>,
    ) -> OperationContext {
        if let Some(details) = ctx.operation_details() {
            self.events.lock().unwrap().push((
                "response",
                details.clone(),
                ctx.annotation("seen").map(str::to_string),
            ));
        }
        ctx
    }
}

#[tokio::test]
async fn test_hooks_see_operation_details() {
    let hooks = Arc::new(RecordingHooks::default());
    let store: Store<String, String, Vec<u8>> = Store::new(
        Arc::new(InMemoryBackend::new()),
        TABLE,
        [StoreOption::<String, String>::Hooks(hooks.clone())],
    );
    let ctx = OperationContext::new();

    store
        .create(&ctx, &k("A"), &k("s1"), &b"data".to_vec(), [])
        .await
        .unwrap();
    store.get(&ctx, &k("A"), &k("s1"), []).await.unwrap();
    store
        .list_by_sort_key_prefix(&ctx, &k("A"), "s", [])
        .await
        .unwrap();
    store.delete(&ctx, &k("A"), &k("s1"), []).await.unwrap();

    let events = hooks.events.lock().unwrap();
    let operations: Vec<(&str, Operation)> =
        events.iter().map(|(kind, d, _)| (*kind, d.name)).collect();
    assert_eq!(
        operations,
        vec![
            ("request", Operation::Create),
            ("response", Operation::Create),
            ("request", Operation::Get),
            ("response", Operation::Get),
            ("request", Operation::ListBySortKeyPrefix),
            ("response", Operation::ListBySortKeyPrefix),
            ("request", Operation::Delete),
            ("response", Operation::Delete),
        ]
    );

    let (_, list_details, _) = &events[4];
    assert_eq!(list_details.partition_key, "A");
    assert_eq!(list_details.sort_key, "s");

    for (kind, _, seen) in events.iter() {
        if *kind == "response" {
            assert_eq!(seen.as_deref(), Some("request"));
        }
    }

    // The caller's context is not modified.
    assert!(ctx.operation_details().is_none());
}

#[tokio::test]
async fn test_hooks_skip_response_on_failure() {
    let hooks = Arc::new(RecordingHooks::default());
    let store: Store<String, String, Vec<u8>> = Store::new(
        Arc::new(InMemoryBackend::new()),
        TABLE,
        [StoreOption::<String, String>::Hooks(hooks.clone())],
    );
    let ctx = OperationContext::new();

    store
        .update(&ctx, &k("A"), &k("s1"), &b"data".to_vec(), [])
        .await
        .unwrap_err();

    let events = hooks.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "request");
}

// ==================== Deadlines ====================

/// Backend whose calls never complete in time.
struct SlowBackend;

#[async_trait]
impl Backend for SlowBackend {
    async fn get_item(&self, _request: &GetItemRequest) -> Result<GetItemResponse, BackendError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(GetItemResponse::default())
    }

    async fn update_item(
        &self,
        _request: &UpdateItemRequest,
    ) -> Result<UpdateItemResponse, BackendError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(UpdateItemResponse::default())
    }

    async fn delete_item(
        &self,
        _request: &DeleteItemRequest,
    ) -> Result<DeleteItemResponse, BackendError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(DeleteItemResponse::default())
    }

    async fn query(&self, _request: &QueryRequest) -> Result<QueryResponse, BackendError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(QueryResponse::default())
    }
}

#[tokio::test]
async fn test_deadline_bounds_backend_call() {
    let store: Store<String, String, Vec<u8>> = Store::new(Arc::new(SlowBackend), TABLE, []);
    let ctx = OperationContext::new().with_timeout(Duration::from_millis(20));

    let err = store.get(&ctx, &k("A"), &k("s1"), []).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::DeadlineExceeded {
            operation: Operation::Get
        }
    ));

    let err = store
        .create(&ctx, &k("A"), &k("s1"), &b"data".to_vec(), [])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DeadlineExceeded { .. }));
}

#[tokio::test]
async fn test_concurrent_creates_on_one_key() {
    let (_, store) = store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .create(
                        &OperationContext::new(),
                        &k("A"),
                        &k("s1"),
                        &b"data".to_vec(),
                        [],
                    )
                    .await
                    .is_ok()
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}
