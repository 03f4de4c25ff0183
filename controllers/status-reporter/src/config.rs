//! Reporter configuration.
//!
//! Every name the reporter depends on is a field here rather than a
//! constant, so tests can substitute names and several reporters can run
//! side by side.

use crate::error::ControllerError;
use crds::OperandVersion;
use std::time::Duration;

const DEFAULT_OPERATOR_NAME: &str = "cluster-autoscaler";
const DEFAULT_DEPENDENCY_NAME: &str = "machine-api";
const DEFAULT_OPERAND_NAME: &str = "operator";
const DEFAULT_OPERATOR_NAMESPACE: &str = "openshift-cluster-api";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Reason tokens written into status conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionReasons {
    /// Reason used when the dependency is down or unreachable
    pub missing_dependency: String,
    /// Reason used while versions are being rolled out
    pub syncing: String,
    /// Reason used when the version comparison itself fails (empty by default)
    pub version_check: String,
}

impl Default for ConditionReasons {
    fn default() -> Self {
        Self {
            missing_dependency: "MissingDependency".to_string(),
            syncing: "SyncingResources".to_string(),
            version_check: String::new(),
        }
    }
}

/// Configuration for a status reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Name of this operator's ClusterOperator record
    pub operator_name: String,
    /// Name of the dependency's ClusterOperator record
    pub dependency_name: String,
    /// Versions published in every status write
    pub versions: Vec<OperandVersion>,
    /// Namespace the operator runs in, listed as a related object
    pub operator_namespace: String,
    /// Time between the start of two polling ticks
    pub poll_interval: Duration,
    /// Reason tokens for synthesized conditions
    pub reasons: ConditionReasons,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            operator_name: DEFAULT_OPERATOR_NAME.to_string(),
            dependency_name: DEFAULT_DEPENDENCY_NAME.to_string(),
            versions: vec![OperandVersion::new(DEFAULT_OPERAND_NAME, env!("CARGO_PKG_VERSION"))],
            operator_namespace: DEFAULT_OPERATOR_NAMESPACE.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            reasons: ConditionReasons::default(),
        }
    }
}

impl ReporterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to defaults; set-but-invalid values are
    /// rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let operator_name = non_empty(&lookup, "OPERATOR_NAME")?
            .unwrap_or(defaults.operator_name);
        let dependency_name = non_empty(&lookup, "DEPENDENCY_NAME")?
            .unwrap_or(defaults.dependency_name);
        let operand_name = non_empty(&lookup, "OPERAND_NAME")?
            .unwrap_or_else(|| DEFAULT_OPERAND_NAME.to_string());
        let release_version = non_empty(&lookup, "RELEASE_VERSION")?
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
        let operator_namespace = non_empty(&lookup, "OPERATOR_NAMESPACE")?
            .unwrap_or(defaults.operator_namespace);

        let poll_interval = match lookup("STATUS_POLL_INTERVAL_SECS") {
            None => defaults.poll_interval,
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ControllerError::InvalidConfig(
                    format!("STATUS_POLL_INTERVAL_SECS must be a whole number of seconds, got {:?}: {}", raw, e)
                ))?;
                if secs == 0 {
                    return Err(ControllerError::InvalidConfig(
                        "STATUS_POLL_INTERVAL_SECS must be greater than zero".to_string()
                    ));
                }
                Duration::from_secs(secs)
            }
        };

        Ok(Self {
            operator_name,
            dependency_name,
            versions: vec![OperandVersion::new(operand_name, release_version)],
            operator_namespace,
            poll_interval,
            reasons: defaults.reasons,
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Result<Option<String>, ControllerError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ControllerError::InvalidConfig(
            format!("{} must not be empty", key)
        )),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}
