//! Store, write, read and delete option sets.
//!
//! Each line is an enum of option values applied left to right over a default
//! configuration record. Applying an option only sets a field; validation such
//! as the reserved-field check happens when the record is used.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::fields::FieldsDef;
use crate::hooks::{NoopHooks, StoreHooks};

// ============================================================================
// Store options
// ============================================================================

/// An option applied when constructing a store.
pub enum StoreOption<P, S> {
    /// Replace the instrumentation hooks.
    Hooks(Arc<dyn StoreHooks<P, S>>),
    /// Replace the reserved attribute names.
    Fields(FieldsDef),
}

impl<P, S> StoreOption<P, S> {
    pub fn hooks(hooks: impl StoreHooks<P, S> + 'static) -> Self {
        StoreOption::Hooks(Arc::new(hooks))
    }

    pub fn fields(fields: FieldsDef) -> Self {
        StoreOption::Fields(fields)
    }
}

/// Store-level configuration.
pub struct StoreOptions<P, S> {
    pub hooks: Arc<dyn StoreHooks<P, S>>,
    pub fields: FieldsDef,
}

impl<P, S> Default for StoreOptions<P, S> {
    fn default() -> Self {
        Self {
            hooks: Arc::new(NoopHooks),
            fields: FieldsDef::default(),
        }
    }
}

impl<P, S> StoreOptions<P, S> {
    pub fn apply(mut self, options: impl IntoIterator<Item = StoreOption<P, S>>) -> Self {
        for option in options {
            match option {
                StoreOption::Hooks(hooks) => self.hooks = hooks,
                StoreOption::Fields(fields) => self.fields = fields,
            }
        }
        self
    }
}

impl<P, S> fmt::Debug for StoreOptions<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Write options
// ============================================================================

/// An option applied to a create or update.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOption {
    /// Expire the record this long after the write.
    Ttl(Duration),
    /// Only update when the stored version equals this value.
    Version(i64),
    /// Extra top-level attributes written alongside the payload.
    ExtraFields(BTreeMap<String, serde_json::Value>),
    /// Skip the "does not exist" guard on create.
    CreateConstraintDisabled(bool),
}

impl WriteOption {
    pub fn ttl(ttl: Duration) -> Self {
        WriteOption::Ttl(ttl)
    }

    pub fn version(version: i64) -> Self {
        WriteOption::Version(version)
    }

    pub fn extra_fields<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, serde_json::Value)>,
    {
        WriteOption::ExtraFields(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn create_constraint_disabled(disabled: bool) -> Self {
        WriteOption::CreateConstraintDisabled(disabled)
    }
}

/// Write configuration for a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteOptions {
    pub extra_fields: BTreeMap<String, serde_json::Value>,
    /// Zero means the record never expires.
    pub ttl: Duration,
    /// Zero disables the optimistic-lock check.
    pub version: i64,
    pub create_constraint_disabled: bool,
}

impl WriteOptions {
    pub fn apply(mut self, options: impl IntoIterator<Item = WriteOption>) -> Self {
        for option in options {
            match option {
                WriteOption::Ttl(ttl) => self.ttl = ttl,
                WriteOption::Version(version) => self.version = version,
                WriteOption::ExtraFields(fields) => self.extra_fields = fields,
                WriteOption::CreateConstraintDisabled(disabled) => {
                    self.create_constraint_disabled = disabled
                }
            }
        }
        self
    }
}

// ============================================================================
// Read options
// ============================================================================

/// A secondary index and its key attribute names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    pub name: String,
    pub partition_key: String,
    pub sort_key: String,
}

/// An option applied to a get or list.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOption {
    ConsistentRead(bool),
    /// Resume a listing from a cursor returned by a previous call.
    LastEvaluatedKey(String),
    /// Maximum number of records evaluated by a listing.
    Limit(i32),
    /// List through a secondary index instead of the primary key.
    Index(IndexDef),
}

impl ReadOption {
    pub fn consistent_read(enabled: bool) -> Self {
        ReadOption::ConsistentRead(enabled)
    }

    pub fn last_evaluated_key(cursor: impl Into<String>) -> Self {
        ReadOption::LastEvaluatedKey(cursor.into())
    }

    pub fn limit(limit: i32) -> Self {
        ReadOption::Limit(limit)
    }

    pub fn index(
        name: impl Into<String>,
        partition_key: impl Into<String>,
        sort_key: impl Into<String>,
    ) -> Self {
        ReadOption::Index(IndexDef {
            name: name.into(),
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
        })
    }
}

/// Read configuration for a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOptions {
    pub consistent_read: bool,
    pub last_evaluated_key: Option<String>,
    pub limit: Option<i32>,
    pub index: Option<IndexDef>,
}

impl ReadOptions {
    pub fn apply(mut self, options: impl IntoIterator<Item = ReadOption>) -> Self {
        for option in options {
            match option {
                ReadOption::ConsistentRead(enabled) => self.consistent_read = enabled,
                ReadOption::LastEvaluatedKey(cursor) => self.last_evaluated_key = Some(cursor),
                ReadOption::Limit(limit) => self.limit = Some(limit),
                ReadOption::Index(index) => self.index = Some(index),
            }
        }
        self
    }
}

// ============================================================================
// Delete options
// ============================================================================

/// An option applied to a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOption {
    /// Require the record to exist. Enabled by default.
    Check(bool),
}

impl DeleteOption {
    pub fn check(enabled: bool) -> Self {
        DeleteOption::Check(enabled)
    }
}

/// Delete configuration for a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOptions {
    pub exists_check: bool,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        Self { exists_check: true }
    }
}

impl DeleteOptions {
    pub fn apply(mut self, options: impl IntoIterator<Item = DeleteOption>) -> Self {
        for option in options {
            match option {
                DeleteOption::Check(enabled) => self.exists_check = enabled,
            }
        }
        self
    }
}
