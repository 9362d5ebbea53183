//! Store error types.

use thiserror::Error;

use crate::backend::BackendError;
use crate::context::Operation;
use crate::cursor::CursorError;

/// Errors returned by store operations.
///
/// Wrapped variants carry a short static message naming the step that failed;
/// the underlying error stays reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// An extra field collides with one of the reserved attribute names.
    #[error("extra fields contained name `{field}` which conflicts with table keys attributes")]
    ReservedField { field: String },

    /// The delete existence check failed.
    #[error("delete failed as the partition and sort keys didn't exist in the table")]
    DeleteFailedKeyNotExists,

    #[error("{step}: {source}")]
    Marshal {
        step: &'static str,
        #[source]
        source: serde_dynamo::Error,
    },

    #[error("{step}: {source}")]
    Unmarshal {
        step: &'static str,
        #[source]
        source: serde_dynamo::Error,
    },

    #[error(transparent)]
    Cursor(#[from] CursorError),

    #[error("{step}: {source}")]
    Backend {
        step: &'static str,
        #[source]
        source: BackendError,
    },

    #[error("{operation} exceeded its deadline")]
    DeadlineExceeded { operation: Operation },
}

impl StoreError {
    pub fn marshal(step: &'static str) -> impl FnOnce(serde_dynamo::Error) -> Self {
        move |source| StoreError::Marshal { step, source }
    }

    pub fn unmarshal(step: &'static str) -> impl FnOnce(serde_dynamo::Error) -> Self {
        move |source| StoreError::Unmarshal { step, source }
    }

    pub fn backend(step: &'static str) -> impl FnOnce(BackendError) -> Self {
        move |source| StoreError::Backend { step, source }
    }

    /// The backend error behind this error, if any.
    pub fn backend_error(&self) -> Option<&BackendError> {
        match self {
            StoreError::Backend { source, .. } => Some(source),
            _ => None,
        }
    }

    /// True when a create or update condition was rejected by the backend.
    ///
    /// Create fails this way when the record already exists; update when it is
    /// missing or the expected version does not match.
    pub fn is_conditional_check_failed(&self) -> bool {
        self.backend_error()
            .is_some_and(BackendError::is_conditional_check_failed)
    }

    pub fn is_reserved_field(&self) -> bool {
        matches!(self, StoreError::ReservedField { .. })
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
