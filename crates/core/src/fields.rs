//! Names of the reserved attributes a store manages.

/// Default partition key attribute name.
pub const DEFAULT_PARTITION_KEY_ATTRIBUTE: &str = "id";

/// Default sort key attribute name.
pub const DEFAULT_SORT_KEY_ATTRIBUTE: &str = "name";

/// Default expiry attribute name, registered as the table TTL attribute.
pub const DEFAULT_EXPIRES_ATTRIBUTE: &str = "expires";

/// Default version attribute name used for optimistic locking.
pub const DEFAULT_VERSION_ATTRIBUTE: &str = "version";

/// Default attribute name holding the encoded payload of a record.
pub const DEFAULT_PAYLOAD_ATTRIBUTE: &str = "payload";

/// Attribute names for the five reserved roles of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsDef {
    pub partition_key: String,
    pub sort_key: String,
    pub expires: String,
    pub version: String,
    pub payload: String,
}

impl Default for FieldsDef {
    fn default() -> Self {
        Self {
            partition_key: DEFAULT_PARTITION_KEY_ATTRIBUTE.to_string(),
            sort_key: DEFAULT_SORT_KEY_ATTRIBUTE.to_string(),
            expires: DEFAULT_EXPIRES_ATTRIBUTE.to_string(),
            version: DEFAULT_VERSION_ATTRIBUTE.to_string(),
            payload: DEFAULT_PAYLOAD_ATTRIBUTE.to_string(),
        }
    }
}

impl FieldsDef {
    /// Sets the partition key attribute name.
    pub fn with_partition_key(mut self, name: impl Into<String>) -> Self {
        self.partition_key = name.into();
        self
    }

    /// Sets the sort key attribute name.
    pub fn with_sort_key(mut self, name: impl Into<String>) -> Self {
        self.sort_key = name.into();
        self
    }

    /// Sets the expiry attribute name.
    pub fn with_expires(mut self, name: impl Into<String>) -> Self {
        self.expires = name.into();
        self
    }

    /// Sets the version attribute name.
    pub fn with_version(mut self, name: impl Into<String>) -> Self {
        self.version = name.into();
        self
    }

    /// Sets the payload attribute name.
    pub fn with_payload(mut self, name: impl Into<String>) -> Self {
        self.payload = name.into();
        self
    }

    /// Returns true if `name` collides with one of the reserved attributes.
    pub fn is_reserved(&self, name: &str) -> bool {
        [
            &self.partition_key,
            &self.sort_key,
            &self.expires,
            &self.version,
            &self.payload,
        ]
        .iter()
        .any(|reserved| reserved.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let fields = FieldsDef::default();
        assert_eq!(fields.partition_key, "id");
        assert_eq!(fields.sort_key, "name");
        assert_eq!(fields.expires, "expires");
        assert_eq!(fields.version, "version");
        assert_eq!(fields.payload, "payload");
    }

    #[test]
    fn test_is_reserved_covers_all_roles() {
        let fields = FieldsDef::default();
        for name in ["id", "name", "expires", "version", "payload"] {
            assert!(fields.is_reserved(name), "{name} should be reserved");
        }
        assert!(!fields.is_reserved("created"));
    }

    #[test]
    fn test_renamed_fields_are_reserved() {
        let fields = FieldsDef::default()
            .with_partition_key("PK")
            .with_sort_key("SK")
            .with_payload("data");

        assert!(fields.is_reserved("PK"));
        assert!(fields.is_reserved("data"));
        assert!(!fields.is_reserved("id"));
        assert!(!fields.is_reserved("payload"));
    }
}
