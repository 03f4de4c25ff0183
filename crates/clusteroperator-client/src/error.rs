//! ClusterOperator client errors

use thiserror::Error;

/// Errors that can occur when reading or writing ClusterOperator records
#[derive(Debug, Error)]
pub enum ClusterOperatorError {
    /// Kubernetes API request/response error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// API returned an error
    #[error("ClusterOperator API error: {0}")]
    Api(String),

    /// Record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record cannot be written as given (e.g., missing name)
    #[error("Invalid resource: {0}")]
    InvalidResource(String),
}

impl ClusterOperatorError {
    /// True when the record is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
