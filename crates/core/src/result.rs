//! Operation result envelope.

/// Capacity accounting reported by the backend for a single request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumedCapacity {
    pub table_name: Option<String>,
    pub capacity_units: Option<f64>,
    pub read_capacity_units: Option<f64>,
    pub write_capacity_units: Option<f64>,
}

/// Returned by every store operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationResult {
    /// Version of the record after the operation. Zero when not applicable.
    pub version: i64,
    /// Capacity consumed by the backend request, if reported.
    pub consumed_capacity: Option<ConsumedCapacity>,
    /// Opaque continuation cursor. `None` once a listing is exhausted.
    pub last_evaluated_key: Option<String>,
}

impl OperationResult {
    /// Returns true when a listing has more pages to fetch.
    pub fn has_more(&self) -> bool {
        self.last_evaluated_key.is_some()
    }
}
