//! Controller-specific error types.
//!
//! This module defines error types specific to the status reporter that are
//! not covered by upstream library errors.

use clusteroperator_client::ClusterOperatorError;
use kube::Error as KubeError;
use thiserror::Error;

/// Errors that can occur in the status reporter.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// ClusterOperator store error
    #[error("ClusterOperator error: {0}")]
    ClusterOperator(#[from] ClusterOperatorError),

    /// Kubernetes client construction error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Desired versions could not be determined
    #[error("Desired versions unavailable: {0}")]
    DesiredVersions(String),
}
