//! Kubernetes-backed ClusterOperator client
//!
//! ClusterOperator is cluster-scoped, so every call goes through
//! `Api::all`. Status writes use the status subresource.

use crate::error::ClusterOperatorError;
use crate::operator_trait::ClusterOperatorClientTrait;
use crds::ClusterOperator;
use kube::api::{Patch, PatchParams, PostParams};
use kube::{Api, Client};
use serde_json::json;
use tracing::debug;

/// ClusterOperator client backed by the Kubernetes API
#[derive(Clone)]
pub struct ClusterOperatorClient {
    api: Api<ClusterOperator>,
}

impl std::fmt::Debug for ClusterOperatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterOperatorClient").finish_non_exhaustive()
    }
}

impl ClusterOperatorClient {
    /// Create a client from an existing Kubernetes client
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }

    /// Fetch a ClusterOperator by name
    pub async fn get(&self, name: &str) -> Result<ClusterOperator, ClusterOperatorError> {
        debug!("Fetching ClusterOperator {}", name);

        self.api
            .get_opt(name)
            .await?
            .ok_or_else(|| ClusterOperatorError::NotFound(format!("ClusterOperator {} not found", name)))
    }

    /// Create a ClusterOperator
    pub async fn create(&self, cluster_operator: &ClusterOperator) -> Result<ClusterOperator, ClusterOperatorError> {
        let name = record_name(cluster_operator)?;
        debug!("Creating ClusterOperator {}", name);

        let created = self.api.create(&PostParams::default(), cluster_operator).await?;
        Ok(created)
    }

    /// Overwrite the status of a ClusterOperator
    ///
    /// Sends the whole status object as a merge patch. Every status list is
    /// always serialized, so the stored lists are replaced rather than merged.
    pub async fn update_status(&self, cluster_operator: &ClusterOperator) -> Result<ClusterOperator, ClusterOperatorError> {
        let name = record_name(cluster_operator)?;
        debug!("Updating ClusterOperator {} status", name);

        let status_patch = json!({
            "status": cluster_operator.status.clone().unwrap_or_default()
        });

        let updated = self.api
            .patch_status(name, &PatchParams::default(), &Patch::Merge(&status_patch))
            .await?;
        Ok(updated)
    }
}

fn record_name(cluster_operator: &ClusterOperator) -> Result<&str, ClusterOperatorError> {
    cluster_operator.metadata.name.as_deref()
        .ok_or_else(|| ClusterOperatorError::InvalidResource("ClusterOperator missing name".to_string()))
}

#[async_trait::async_trait]
impl ClusterOperatorClientTrait for ClusterOperatorClient {
    async fn get(&self, name: &str) -> Result<ClusterOperator, ClusterOperatorError> {
        self.get(name).await
    }

    async fn create(&self, cluster_operator: &ClusterOperator) -> Result<ClusterOperator, ClusterOperatorError> {
        self.create(cluster_operator).await
    }

    async fn update_status(&self, cluster_operator: &ClusterOperator) -> Result<ClusterOperator, ClusterOperatorError> {
        self.update_status(cluster_operator).await
    }
}
