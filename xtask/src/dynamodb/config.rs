//! Table configuration types (pure data).

use dynastore_core::fields::{
    DEFAULT_EXPIRES_ATTRIBUTE, DEFAULT_PARTITION_KEY_ATTRIBUTE, DEFAULT_SORT_KEY_ATTRIBUTE,
};

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: KeyAttribute,
    /// Local indexes share the table partition key and can only be created
    /// with the table.
    pub lsis: Vec<IndexConfig>,
    pub gsis: Vec<IndexConfig>,
    /// Attribute registered for time-to-live expiry.
    pub ttl_attribute: Option<String>,
}

/// A key attribute definition. Keys are always strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
}

impl KeyAttribute {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Secondary index configuration, projecting all attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: KeyAttribute,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Every distinct key attribute used by the table and its indexes.
    pub fn key_attributes(&self) -> Vec<&KeyAttribute> {
        let mut attributes: Vec<&KeyAttribute> = Vec::new();
        let indexes = self.lsis.iter().chain(&self.gsis);
        let candidates = [&self.partition_key, &self.sort_key]
            .into_iter()
            .chain(indexes.flat_map(|index| [&index.partition_key, &index.sort_key]));

        for attribute in candidates {
            if !attributes.iter().any(|a| a.name == attribute.name) {
                attributes.push(attribute);
            }
        }
        attributes
    }
}

/// Returns the table configuration used by the dynastore test suites.
/// This is a pure function - no I/O.
pub fn dynastore_table_config() -> TableConfig {
    TableConfig {
        table_name: "dynastore".to_string(),
        partition_key: KeyAttribute::new(DEFAULT_PARTITION_KEY_ATTRIBUTE),
        sort_key: KeyAttribute::new(DEFAULT_SORT_KEY_ATTRIBUTE),
        lsis: vec![IndexConfig {
            name: "idx_created".to_string(),
            partition_key: KeyAttribute::new(DEFAULT_PARTITION_KEY_ATTRIBUTE),
            sort_key: KeyAttribute::new("created"),
        }],
        gsis: vec![IndexConfig {
            name: "idx_global_1".to_string(),
            partition_key: KeyAttribute::new("pk1"),
            sort_key: KeyAttribute::new("sk1"),
        }],
        ttl_attribute: Some(DEFAULT_EXPIRES_ATTRIBUTE.to_string()),
    }
}
