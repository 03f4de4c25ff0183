//! Main controller implementation.
//!
//! This module contains the `Controller` struct that wires the Kubernetes
//! client, the status reporter and the polling loop together.

use crate::config::ReporterConfig;
use crate::error::ControllerError;
use crate::poller::{PollOutcome, Poller};
use crate::reporter::StatusReporter;
use crate::versions::StaticDesiredVersions;
use clusteroperator_client::ClusterOperatorClient;
use crds::ObjectReference;
use kube::Client;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Main controller for operator status reporting.
#[derive(Debug)]
pub struct Controller {
    poller: Poller,
}

impl Controller {
    /// Creates a new controller instance.
    pub async fn new(config: ReporterConfig) -> Result<Self, ControllerError> {
        info!("Initializing status reporter");

        // Create Kubernetes client
        let kube_client = Client::try_default().await?;
        let cluster_operator_client = ClusterOperatorClient::new(kube_client);

        let related_objects = vec![ObjectReference::namespace(config.operator_namespace.clone())];
        let desired_versions = StaticDesiredVersions::new(config.versions.clone());
        let interval = config.poll_interval;

        let reporter = StatusReporter::new(
            Arc::new(cluster_operator_client),
            config,
            related_objects,
        );

        Ok(Self {
            poller: Poller::new(Arc::new(reporter), Arc::new(desired_versions), interval),
        })
    }

    /// Runs the controller until the operator is available or shutdown is
    /// signalled.
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> PollOutcome {
        info!("Status reporter running");
        self.poller.run(shutdown).await
    }
}
