//! Desired versions and drift detection.

use crate::equality::operand_versions_eq;
use crate::error::ControllerError;
use crds::OperandVersion;

/// Source of the operand versions this operator should be reporting.
#[async_trait::async_trait]
pub trait DesiredVersionSource: Send + Sync {
    /// Current desired versions, in the order they should be published.
    async fn desired_versions(&self) -> Result<Vec<OperandVersion>, ControllerError>;
}

/// Desired versions fixed at construction.
///
/// An empty list is reported as an error; publishing no versions would make
/// any record look up to date.
#[derive(Debug, Clone)]
pub struct StaticDesiredVersions {
    versions: Vec<OperandVersion>,
}

impl StaticDesiredVersions {
    pub fn new(versions: Vec<OperandVersion>) -> Self {
        Self { versions }
    }
}

#[async_trait::async_trait]
impl DesiredVersionSource for StaticDesiredVersions {
    async fn desired_versions(&self) -> Result<Vec<OperandVersion>, ControllerError> {
        if self.versions.is_empty() {
            return Err(ControllerError::DesiredVersions("no operand versions configured".to_string()));
        }
        Ok(self.versions.clone())
    }
}

/// True unless `desired` and `observed` match element for element.
pub fn versions_differ(desired: &[OperandVersion], observed: &[OperandVersion]) -> bool {
    !operand_versions_eq(desired, observed)
}

/// Formats versions as `name: version` joined by `, `, in input order.
pub fn format_operand_versions(versions: &[OperandVersion]) -> String {
    versions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
