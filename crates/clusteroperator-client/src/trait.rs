//! ClusterOperatorClient trait for mocking
//!
//! This trait abstracts the ClusterOperator store so the status reporter can
//! be unit tested without a cluster. The kube-backed client implements it,
//! and tests use `MockClusterOperatorClient`.

use crate::error::ClusterOperatorError;
use crds::ClusterOperator;

/// Trait for ClusterOperator store operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait ClusterOperatorClientTrait: Send + Sync {
    /// Fetch a record by name. Absence is `ClusterOperatorError::NotFound`.
    async fn get(&self, name: &str) -> Result<ClusterOperator, ClusterOperatorError>;

    /// Create a record.
    async fn create(&self, cluster_operator: &ClusterOperator) -> Result<ClusterOperator, ClusterOperatorError>;

    /// Overwrite the status sub-object of an existing record.
    async fn update_status(&self, cluster_operator: &ClusterOperator) -> Result<ClusterOperator, ClusterOperatorError>;
}
