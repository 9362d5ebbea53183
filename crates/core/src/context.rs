//! Request-scoped context passed explicitly through every store call.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use crate::key::Key;

/// Name of a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
    ListBySortKeyPrefix,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Get => "Get",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
            Operation::ListBySortKeyPrefix => "ListBySortKeyPrefix",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Details of the operation currently being handled, for log/trace correlation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDetails {
    pub name: Operation,
    pub partition_key: String,
    pub sort_key: String,
}

/// Request-scoped context.
///
/// The store sets [`OperationDetails`] at the start of every call; hooks may add
/// annotations which are visible to the hooks invoked later in the same call.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    deadline: Option<Instant>,
    details: Option<OperationDetails>,
    annotations: BTreeMap<String, String>,
}

impl OperationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the backend call to finish before `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Bounds the backend call to finish within `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Attaches the details of `operation` to this context.
    pub fn with_operation<P: Key, S: Key>(
        mut self,
        operation: Operation,
        partition_key: &P,
        sort_key: &S,
    ) -> Self {
        self.details = Some(OperationDetails {
            name: operation,
            partition_key: partition_key.to_key_string(),
            sort_key: sort_key.to_key_string(),
        });
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline. `Some(Duration::ZERO)` once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Details of the operation in flight, if any.
    pub fn operation_details(&self) -> Option<&OperationDetails> {
        self.details.as_ref()
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    pub fn annotations(&self) -> &BTreeMap<String, String> {
        &self.annotations
    }
}
