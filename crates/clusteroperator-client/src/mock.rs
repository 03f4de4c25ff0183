//! Mock ClusterOperatorClient for unit testing
//!
//! This module provides an in-memory implementation of
//! `ClusterOperatorClientTrait` so reporters can be tested without a cluster.
//! Failures can be injected per operation and every write is counted.

use crate::error::ClusterOperatorError;
use crate::operator_trait::ClusterOperatorClientTrait;
use crds::{ClusterOperator, ClusterOperatorSpec, ClusterOperatorStatus};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock ClusterOperatorClient for testing
///
/// Clones share the same store, so a test can keep a handle while the
/// reporter owns another.
#[derive(Clone, Default)]
pub struct MockClusterOperatorClient {
    records: Arc<Mutex<HashMap<String, ClusterOperator>>>,
    // Injected failures, keyed by record name
    get_failures: Arc<Mutex<HashMap<String, String>>>,
    create_failure: Arc<Mutex<Option<String>>>,
    update_failure: Arc<Mutex<Option<String>>>,
    // Call counters
    create_calls: Arc<Mutex<usize>>,
    update_status_calls: Arc<Mutex<usize>>,
}

impl std::fmt::Debug for MockClusterOperatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClusterOperatorClient")
            .field("records", &lock(&self.records).keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockClusterOperatorClient {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to the mock store (for test setup)
    pub fn add_cluster_operator(&self, cluster_operator: ClusterOperator) {
        let name = cluster_operator.metadata.name.clone().unwrap_or_default();
        lock(&self.records).insert(name, cluster_operator);
    }

    /// Add a record with the given name and status (for test setup)
    pub fn add_with_status(&self, name: &str, status: ClusterOperatorStatus) {
        let mut cluster_operator = ClusterOperator::new(name, ClusterOperatorSpec::default());
        cluster_operator.status = Some(status);
        self.add_cluster_operator(cluster_operator);
    }

    /// Remove a record from the mock store
    pub fn remove(&self, name: &str) {
        lock(&self.records).remove(name);
    }

    /// Current copy of a stored record
    pub fn stored(&self, name: &str) -> Option<ClusterOperator> {
        lock(&self.records).get(name).cloned()
    }

    /// Current status of a stored record
    pub fn stored_status(&self, name: &str) -> Option<ClusterOperatorStatus> {
        self.stored(name).and_then(|co| co.status)
    }

    /// Make `get` fail for the given name with an API error
    pub fn fail_get(&self, name: &str, message: impl Into<String>) {
        lock(&self.get_failures).insert(name.to_string(), message.into());
    }

    /// Stop failing `get` for the given name
    pub fn clear_get_failure(&self, name: &str) {
        lock(&self.get_failures).remove(name);
    }

    /// Make every `create` fail with an API error
    pub fn fail_create(&self, message: impl Into<String>) {
        *lock(&self.create_failure) = Some(message.into());
    }

    /// Make every `update_status` fail with an API error
    pub fn fail_update_status(&self, message: impl Into<String>) {
        *lock(&self.update_failure) = Some(message.into());
    }

    /// Stop failing `update_status`
    pub fn clear_update_status_failure(&self) {
        *lock(&self.update_failure) = None;
    }

    /// Number of successful `create` calls
    pub fn create_calls(&self) -> usize {
        *lock(&self.create_calls)
    }

    /// Number of successful `update_status` calls
    pub fn update_status_calls(&self) -> usize {
        *lock(&self.update_status_calls)
    }
}

fn name_of(cluster_operator: &ClusterOperator) -> Result<String, ClusterOperatorError> {
    cluster_operator.metadata.name.clone()
        .ok_or_else(|| ClusterOperatorError::InvalidResource("ClusterOperator missing name".to_string()))
}

#[async_trait::async_trait]
impl ClusterOperatorClientTrait for MockClusterOperatorClient {
    async fn get(&self, name: &str) -> Result<ClusterOperator, ClusterOperatorError> {
        if let Some(message) = lock(&self.get_failures).get(name) {
            return Err(ClusterOperatorError::Api(message.clone()));
        }

        lock(&self.records)
            .get(name)
            .cloned()
            .ok_or_else(|| ClusterOperatorError::NotFound(format!("ClusterOperator {} not found", name)))
    }

    async fn create(&self, cluster_operator: &ClusterOperator) -> Result<ClusterOperator, ClusterOperatorError> {
        if let Some(message) = lock(&self.create_failure).clone() {
            return Err(ClusterOperatorError::Api(message));
        }

        let name = name_of(cluster_operator)?;
        let mut records = lock(&self.records);
        if records.contains_key(&name) {
            return Err(ClusterOperatorError::Api(format!("ClusterOperator {} already exists", name)));
        }
        records.insert(name, cluster_operator.clone());
        *lock(&self.create_calls) += 1;
        Ok(cluster_operator.clone())
    }

    async fn update_status(&self, cluster_operator: &ClusterOperator) -> Result<ClusterOperator, ClusterOperatorError> {
        if let Some(message) = lock(&self.update_failure).clone() {
            return Err(ClusterOperatorError::Api(message));
        }

        let name = name_of(cluster_operator)?;
        let mut records = lock(&self.records);
        let stored = records
            .get_mut(&name)
            .ok_or_else(|| ClusterOperatorError::NotFound(format!("ClusterOperator {} not found", name)))?;
        stored.status = cluster_operator.status.clone();
        *lock(&self.update_status_calls) += 1;
        Ok(stored.clone())
    }
}
