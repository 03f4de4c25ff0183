//! Status polling loop.
//!
//! Each tick checks the dependency, compares versions and publishes the
//! resulting state. Recoverable errors are reported through the Failing
//! condition instead of ending the loop; the loop only ends once the operator
//! is reported Available or the shutdown signal is raised.

use crate::error::ControllerError;
use crate::reporter::StatusReporter;
use crate::versions::{format_operand_versions, DesiredVersionSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Branch taken by a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Dependency status could not be fetched; reported as Failing
    DependencyError,
    /// Dependency is not available or is failing; reported as Failing
    DependencyNotReady,
    /// Desired or published versions could not be read; reported as Failing
    VersionCheckError,
    /// Versions differ; reported as Progressing
    Progressing,
    /// Everything is in place; reported as Available
    Available,
}

/// How the polling loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Operator was reported Available
    Available,
    /// Shutdown was signalled before the operator became Available
    Cancelled,
}

/// Drives `StatusReporter` at a fixed interval.
pub struct Poller {
    reporter: Arc<StatusReporter>,
    desired_versions: Arc<dyn DesiredVersionSource>,
    interval: Duration,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("reporter", &self.reporter)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl Poller {
    pub fn new(
        reporter: Arc<StatusReporter>,
        desired_versions: Arc<dyn DesiredVersionSource>,
        interval: Duration,
    ) -> Self {
        Self {
            reporter,
            desired_versions,
            interval,
        }
    }

    /// Runs one check-and-report pass.
    ///
    /// Dependency and version check failures become Failing conditions and
    /// are not returned. Only a failure to write the status is an error.
    pub async fn tick(&self) -> Result<TickOutcome, ControllerError> {
        let config = self.reporter.config();
        let reasons = &config.reasons;

        let healthy = match self.reporter.check_dependency().await {
            Ok(healthy) => healthy,
            Err(e) => {
                let message = format!("error checking {} operator status: {}", config.dependency_name, e);
                warn!("{}", message);
                self.reporter.fail(&reasons.missing_dependency, &message).await?;
                return Ok(TickOutcome::DependencyError);
            }
        };

        if !healthy {
            let message = format!("{} operator not ready", config.dependency_name);
            self.reporter.fail(&reasons.missing_dependency, &message).await?;
            return Ok(TickOutcome::DependencyNotReady);
        }

        let desired = match self.desired_versions.desired_versions().await {
            Ok(desired) => desired,
            Err(e) => {
                let message = format!("error checking {} version: {}", config.operator_name, e);
                warn!("{}", message);
                self.reporter.fail(&reasons.version_check, &message).await?;
                return Ok(TickOutcome::VersionCheckError);
            }
        };

        let differs = match self.reporter.is_different_versions(&desired).await {
            Ok(differs) => differs,
            Err(e) => {
                let message = format!("error checking {} version: {}", config.operator_name, e);
                warn!("{}", message);
                self.reporter.fail(&reasons.version_check, &message).await?;
                return Ok(TickOutcome::VersionCheckError);
            }
        };

        if differs {
            let message = format!("Syncing to version {}", format_operand_versions(&desired));
            info!("{}", message);
            self.reporter.progressing(&reasons.syncing, &message).await?;
            return Ok(TickOutcome::Progressing);
        }

        self.reporter.available("", "").await?;
        Ok(TickOutcome::Available)
    }

    /// Polls until the operator is reported Available or `shutdown` is raised.
    ///
    /// The first tick runs immediately. Later ticks start one interval after
    /// the previous one started; a tick that overruns pushes the schedule
    /// back instead of causing a burst. A closed shutdown channel counts as
    /// a shutdown.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> PollOutcome {
        let operator_name = &self.reporter.config().operator_name;
        info!(
            "Starting status polling for ClusterOperator {} every {:?}",
            operator_name, self.interval
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                info!("Status polling for {} cancelled", operator_name);
                return PollOutcome::Cancelled;
            }

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow_and_update() {
                        info!("Status polling for {} cancelled", operator_name);
                        return PollOutcome::Cancelled;
                    }
                    continue;
                }
                _ = ticker.tick() => {}
            }

            match self.tick().await {
                Ok(TickOutcome::Available) => {
                    info!("ClusterOperator {} reported available", operator_name);
                    return PollOutcome::Available;
                }
                Ok(outcome) => {
                    debug!("Status tick for {} finished: {:?}", operator_name, outcome);
                }
                Err(e) => {
                    error!("Failed to report status for {}: {}", operator_name, e);
                }
            }
        }
    }
}
