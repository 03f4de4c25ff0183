//! ClusterOperator status reporting.
//!
//! `StatusReporter` owns the store client and everything published with
//! each status write (versions, related objects). It reads the operator's
//! record fresh on every call and never caches it.

use crate::conditions::{self, merge_conditions, transition_now};
use crate::config::ReporterConfig;
use crate::equality::status_eq;
use crate::versions::versions_differ;
use clusteroperator_client::{ClusterOperatorClientTrait, ClusterOperatorError};
use crds::{
    ClusterOperator, ClusterOperatorSpec, ClusterOperatorStatus, ClusterOperatorStatusCondition,
    ConditionType, ObjectReference, OperandVersion,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Reports the operator's status through its ClusterOperator record.
pub struct StatusReporter {
    client: Arc<dyn ClusterOperatorClientTrait>,
    config: ReporterConfig,
    related_objects: Vec<ObjectReference>,
}

impl std::fmt::Debug for StatusReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusReporter")
            .field("config", &self.config)
            .field("related_objects", &self.related_objects)
            .finish_non_exhaustive()
    }
}

impl StatusReporter {
    /// Creates a new reporter instance.
    pub fn new(
        client: Arc<dyn ClusterOperatorClientTrait>,
        config: ReporterConfig,
        related_objects: Vec<ObjectReference>,
    ) -> Self {
        Self {
            client,
            config,
            related_objects,
        }
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Gets, or if necessary creates, the operator's ClusterOperator record.
    ///
    /// Only a not-found error leads to creation; any other fetch error is
    /// returned unchanged.
    pub async fn get_or_create_cluster_operator(&self) -> Result<ClusterOperator, ClusterOperatorError> {
        let name = &self.config.operator_name;

        match self.client.get(name).await {
            Ok(existing) => Ok(existing),
            Err(e) if e.is_not_found() => {
                info!("ClusterOperator {} not found, creating it", name);
                let cluster_operator = ClusterOperator::new(name, ClusterOperatorSpec::default());
                self.client.create(&cluster_operator).await
            }
            Err(e) => Err(e),
        }
    }

    /// Compares the desired versions with the versions currently published.
    pub async fn is_different_versions(&self, desired: &[OperandVersion]) -> Result<bool, ClusterOperatorError> {
        let cluster_operator = self.get_or_create_cluster_operator().await?;
        let current = cluster_operator
            .status
            .as_ref()
            .map(|s| s.versions.as_slice())
            .unwrap_or_default();
        Ok(versions_differ(desired, current))
    }

    /// Builds the status that publishing `conditions` would produce on top of
    /// the `existing` status.
    pub fn desired_status(
        &self,
        conditions: Vec<ClusterOperatorStatusCondition>,
        existing: Option<&ClusterOperatorStatus>,
    ) -> ClusterOperatorStatus {
        let existing_conditions = existing.map(|s| s.conditions.as_slice()).unwrap_or_default();

        ClusterOperatorStatus {
            conditions: merge_conditions(existing_conditions, conditions, transition_now()),
            versions: self.config.versions.clone(),
            related_objects: self.related_objects.clone(),
        }
    }

    /// Applies the given conditions to the ClusterOperator status.
    ///
    /// The status is only written when it differs from what is stored.
    /// Returns whether a write was issued.
    pub async fn apply_conditions(
        &self,
        conditions: Vec<ClusterOperatorStatusCondition>,
    ) -> Result<bool, ClusterOperatorError> {
        let mut cluster_operator = self.get_or_create_cluster_operator().await?;
        let status = self.desired_status(conditions, cluster_operator.status.as_ref());

        if status_eq(cluster_operator.status.as_ref(), Some(&status)) {
            debug!("ClusterOperator {} status unchanged, skipping update", self.config.operator_name);
            return Ok(false);
        }

        cluster_operator.status = Some(status);
        match self.client.update_status(&cluster_operator).await {
            Ok(_) => {
                info!("Updated ClusterOperator {} status", self.config.operator_name);
                Ok(true)
            }
            Err(e) => {
                error!("Failed to update ClusterOperator {} status: {}", self.config.operator_name, e);
                Err(e)
            }
        }
    }

    /// Reports the operator as available, not progressing, and not failing.
    pub async fn available(&self, reason: &str, message: &str) -> Result<bool, ClusterOperatorError> {
        self.apply_conditions(conditions::available(reason, message)).await
    }

    /// Reports the operator as failing but available, and not progressing.
    pub async fn fail(&self, reason: &str, message: &str) -> Result<bool, ClusterOperatorError> {
        self.apply_conditions(conditions::failing(reason, message)).await
    }

    /// Reports the operator as progressing but available, and not failing.
    pub async fn progressing(&self, reason: &str, message: &str) -> Result<bool, ClusterOperatorError> {
        self.apply_conditions(conditions::progressing(reason, message)).await
    }

    /// Checks the dependency's ClusterOperator.
    ///
    /// Healthy means Available is True and Failing is False. A record that
    /// cannot be fetched (including one that does not exist) is an error,
    /// not an unhealthy result.
    pub async fn check_dependency(&self) -> Result<bool, ClusterOperatorError> {
        let name = &self.config.dependency_name;

        let dependency = self.client.get(name).await
            .inspect_err(|e| error!("Failed to get dependency {} status: {}", name, e))?;

        let healthy = dependency.status.as_ref().is_some_and(|s| {
            s.is_condition_true(ConditionType::Available) && s.is_condition_false(ConditionType::Failing)
        });

        if !healthy {
            info!("Dependency {} not ready yet", name);
        }
        Ok(healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusteroperator_client::MockClusterOperatorClient;
    use crds::ConditionStatus;

    const OPERATOR: &str = "cluster-autoscaler";
    const DEPENDENCY: &str = "machine-api";

    fn reporter(mock: &MockClusterOperatorClient) -> StatusReporter {
        let config = ReporterConfig {
            versions: vec![OperandVersion::new("operator", "4.1.0")],
            ..ReporterConfig::default()
        };
        StatusReporter::new(
            Arc::new(mock.clone()),
            config,
            vec![ObjectReference::namespace("openshift-cluster-api")],
        )
    }

    fn dependency_status(available: ConditionStatus, failing: ConditionStatus) -> ClusterOperatorStatus {
        ClusterOperatorStatus {
            conditions: vec![
                ClusterOperatorStatusCondition::new(ConditionType::Available, available),
                ClusterOperatorStatusCondition::new(ConditionType::Failing, failing),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_or_create_creates_missing_record() {
        let mock = MockClusterOperatorClient::new();
        let reporter = reporter(&mock);

        let created = reporter.get_or_create_cluster_operator().await.unwrap();

        assert_eq!(created.metadata.name.as_deref(), Some(OPERATOR));
        assert!(created.status.is_none());
        assert_eq!(mock.create_calls(), 1);
        assert!(mock.stored(OPERATOR).is_some());
    }

    #[tokio::test]
    async fn test_get_or_create_returns_existing_record() {
        let mock = MockClusterOperatorClient::new();
        mock.add_with_status(OPERATOR, dependency_status(ConditionStatus::True, ConditionStatus::False));
        let reporter = reporter(&mock);

        let existing = reporter.get_or_create_cluster_operator().await.unwrap();

        assert!(existing.status.is_some());
        assert_eq!(mock.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_get_or_create_surfaces_other_errors() {
        let mock = MockClusterOperatorClient::new();
        mock.fail_get(OPERATOR, "etcd unavailable");
        let reporter = reporter(&mock);

        let err = reporter.get_or_create_cluster_operator().await.unwrap_err();

        assert!(err.to_string().contains("etcd unavailable"));
        assert_eq!(mock.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_apply_same_conditions_twice_writes_once() {
        let mock = MockClusterOperatorClient::new();
        let reporter = reporter(&mock);

        assert!(reporter.fail("MissingDependency", "machine-api operator not ready").await.unwrap());
        assert!(!reporter.fail("MissingDependency", "machine-api operator not ready").await.unwrap());

        assert_eq!(mock.update_status_calls(), 1);
    }

    #[tokio::test]
    async fn test_apply_writes_when_message_changes() {
        let mock = MockClusterOperatorClient::new();
        let reporter = reporter(&mock);

        reporter.fail("MissingDependency", "first").await.unwrap();
        reporter.fail("MissingDependency", "second").await.unwrap();

        assert_eq!(mock.update_status_calls(), 2);
        let status = mock.stored_status(OPERATOR).unwrap();
        assert_eq!(status.condition(ConditionType::Failing).unwrap().message, "second");
    }

    #[tokio::test]
    async fn test_apply_publishes_versions_and_related_objects() {
        let mock = MockClusterOperatorClient::new();
        let reporter = reporter(&mock);

        reporter.available("", "").await.unwrap();

        let status = mock.stored_status(OPERATOR).unwrap();
        assert_eq!(status.versions, vec![OperandVersion::new("operator", "4.1.0")]);
        assert_eq!(status.related_objects, vec![ObjectReference::namespace("openshift-cluster-api")]);
        assert_eq!(status.conditions.len(), 3);
        assert!(status.is_condition_true(ConditionType::Available));
        assert!(status.is_condition_false(ConditionType::Progressing));
        assert!(status.is_condition_false(ConditionType::Failing));
        assert!(status.conditions.iter().all(|c| c.last_transition_time.is_some()));
    }

    #[tokio::test]
    async fn test_apply_propagates_store_write_errors() {
        let mock = MockClusterOperatorClient::new();
        mock.fail_update_status("conflict");
        let reporter = reporter(&mock);

        let err = reporter.available("", "").await.unwrap_err();
        assert!(err.to_string().contains("conflict"));
    }

    #[tokio::test]
    async fn test_apply_propagates_create_errors() {
        let mock = MockClusterOperatorClient::new();
        mock.fail_create("forbidden");
        let reporter = reporter(&mock);

        let err = reporter.progressing("SyncingResources", "").await.unwrap_err();
        assert!(err.to_string().contains("forbidden"));
        assert_eq!(mock.update_status_calls(), 0);
    }

    #[tokio::test]
    async fn test_is_different_versions() {
        let mock = MockClusterOperatorClient::new();
        let reporter = reporter(&mock);
        let desired = vec![OperandVersion::new("operator", "4.1.0")];

        // Fresh record has no versions
        assert!(reporter.is_different_versions(&desired).await.unwrap());

        reporter.progressing("SyncingResources", "").await.unwrap();
        assert!(!reporter.is_different_versions(&desired).await.unwrap());

        let newer = vec![OperandVersion::new("operator", "4.2.0")];
        assert!(reporter.is_different_versions(&newer).await.unwrap());
    }

    #[tokio::test]
    async fn test_check_dependency_healthy() {
        let mock = MockClusterOperatorClient::new();
        mock.add_with_status(DEPENDENCY, dependency_status(ConditionStatus::True, ConditionStatus::False));
        let reporter = reporter(&mock);

        assert!(reporter.check_dependency().await.unwrap());
    }

    #[tokio::test]
    async fn test_check_dependency_unhealthy_values() {
        let mock = MockClusterOperatorClient::new();
        let reporter = reporter(&mock);

        for (available, failing) in [
            (ConditionStatus::False, ConditionStatus::False),
            (ConditionStatus::True, ConditionStatus::True),
            (ConditionStatus::Unknown, ConditionStatus::False),
            (ConditionStatus::True, ConditionStatus::Unknown),
        ] {
            mock.add_with_status(DEPENDENCY, dependency_status(available, failing));
            assert!(!reporter.check_dependency().await.unwrap(), "{available}/{failing}");
        }
    }

    #[tokio::test]
    async fn test_check_dependency_without_conditions_is_unhealthy() {
        let mock = MockClusterOperatorClient::new();
        mock.add_cluster_operator(ClusterOperator::new(DEPENDENCY, ClusterOperatorSpec::default()));
        let reporter = reporter(&mock);

        assert!(!reporter.check_dependency().await.unwrap());

        mock.add_with_status(DEPENDENCY, ClusterOperatorStatus::default());
        assert!(!reporter.check_dependency().await.unwrap());
    }

    #[tokio::test]
    async fn test_check_dependency_missing_is_error() {
        let mock = MockClusterOperatorClient::new();
        let reporter = reporter(&mock);

        let err = reporter.check_dependency().await.unwrap_err();
        assert!(err.is_not_found());
        // The dependency record is never created
        assert!(mock.stored(DEPENDENCY).is_none());
    }

    #[tokio::test]
    async fn test_check_dependency_fetch_error_is_error() {
        let mock = MockClusterOperatorClient::new();
        mock.add_with_status(DEPENDENCY, dependency_status(ConditionStatus::True, ConditionStatus::False));
        mock.fail_get(DEPENDENCY, "timeout");
        let reporter = reporter(&mock);

        assert!(reporter.check_dependency().await.is_err());
    }
}
