use std::env;

/// Default table name when `DYNASTORE_TABLE_NAME` is unset.
pub const DEFAULT_TABLE_NAME: &str = "dynastore";

/// Default AWS region when `AWS_REGION` is unset.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Store configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Table name (default: "dynastore")
    pub table_name: String,
    /// Endpoint override, e.g. a DynamoDB Local URL (default: none)
    pub endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    pub region: String,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNASTORE_TABLE_NAME` - Table name (default: "dynastore")
    /// - `AWS_ENDPOINT_URL` - Endpoint override (default: none)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("DYNASTORE_TABLE_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok().filter(|v| !v.is_empty()),
            region: env::var("AWS_REGION")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        }
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
