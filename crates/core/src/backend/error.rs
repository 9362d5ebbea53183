use thiserror::Error;

/// Errors reported by a backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request condition evaluated to false against the stored item.
    #[error("conditional check failed: {0}")]
    ConditionalCheckFailed(String),
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    #[error("throughput exceeded: {0}")]
    Throttled(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("backend service error")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BackendError {
    pub fn is_conditional_check_failed(&self) -> bool {
        matches!(self, BackendError::ConditionalCheckFailed(_))
    }
}
