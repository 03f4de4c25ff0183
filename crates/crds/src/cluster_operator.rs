//! ClusterOperator CRD
//!
//! Status record an operator publishes to the cluster version authority.
//! The record is cluster-scoped and identified by the operator's name; only
//! its status sub-object carries information.

use chrono::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::references::ObjectReference;

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[kube(
    group = "config.openshift.io",
    version = "v1",
    kind = "ClusterOperator",
    status = "ClusterOperatorStatus",
    derive = "PartialEq"
)]
#[allow(clippy::empty_structs_with_brackets, reason = "spec must serialize as an empty object")]
pub struct ClusterOperatorSpec {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOperatorStatus {
    /// Health conditions, at most one per type
    #[serde(default)]
    pub conditions: Vec<ClusterOperatorStatusCondition>,

    /// Versions of the operands this operator manages
    #[serde(default)]
    pub versions: Vec<OperandVersion>,

    /// Objects useful for debugging this operator
    #[serde(default)]
    pub related_objects: Vec<ObjectReference>,
}

impl ClusterOperatorStatus {
    /// Returns the condition of the given type, if present.
    pub fn condition(&self, condition_type: ConditionType) -> Option<&ClusterOperatorStatusCondition> {
        self.conditions.iter().find(|c| c.type_ == condition_type)
    }

    /// True when the condition is present with status `True`.
    pub fn is_condition_true(&self, condition_type: ConditionType) -> bool {
        self.condition(condition_type)
            .is_some_and(|c| c.status == ConditionStatus::True)
    }

    /// True when the condition is present with status `False`.
    pub fn is_condition_false(&self, condition_type: ConditionType) -> bool {
        self.condition(condition_type)
            .is_some_and(|c| c.status == ConditionStatus::False)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOperatorStatusCondition {
    /// Condition type
    #[serde(rename = "type")]
    pub type_: ConditionType,

    /// Condition status
    pub status: ConditionStatus,

    /// Machine-readable reason token (may be empty)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// Human-readable message (may be empty)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Last time the condition's status changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,
}

impl ClusterOperatorStatusCondition {
    /// Create a condition with empty reason and message.
    pub fn new(type_: ConditionType, status: ConditionStatus) -> Self {
        Self {
            type_,
            status,
            reason: String::new(),
            message: String::new(),
            last_transition_time: None,
        }
    }

    /// Set the reason and message.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>, message: impl Into<String>) -> Self {
        self.reason = reason.into();
        self.message = message.into();
        self
    }
}

/// Condition type
///
/// Types other than the three this operator publishes are read back as
/// `Other` so that foreign records still deserialize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum ConditionType {
    /// Operator is functional and available
    Available,

    /// Operator is rolling out a change
    Progressing,

    /// Operator hit an error it cannot recover from on its own
    Failing,

    /// Any other condition type
    #[serde(other)]
    Other,
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Available => "Available",
            Self::Progressing => "Progressing",
            Self::Failing => "Failing",
            Self::Other => "Other",
        };
        f.write_str(s)
    }
}

/// Condition status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub enum ConditionStatus {
    /// Condition holds
    True,
    /// Condition does not hold
    False,
    /// Condition could not be determined
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub struct OperandVersion {
    /// Operand name
    pub name: String,

    /// Operand version
    pub version: String,
}

impl OperandVersion {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for OperandVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserializes_foreign_condition_types() {
        let status: ClusterOperatorStatus = serde_json::from_value(serde_json::json!({
            "conditions": [
                {"type": "Available", "status": "True"},
                {"type": "Upgradeable", "status": "Maybe", "reason": "AsExpected"},
                {"type": "Failing", "status": "False"}
            ]
        }))
        .unwrap();

        assert_eq!(status.conditions.len(), 3);
        assert_eq!(status.conditions[1].type_, ConditionType::Other);
        assert_eq!(status.conditions[1].status, ConditionStatus::Unknown);
        assert!(status.versions.is_empty());
        assert!(status.related_objects.is_empty());
        assert!(status.is_condition_true(ConditionType::Available));
        assert!(status.is_condition_false(ConditionType::Failing));
        assert!(!status.is_condition_true(ConditionType::Progressing));
        assert!(!status.is_condition_false(ConditionType::Progressing));
    }

    #[test]
    fn test_condition_serializes_camel_case_and_skips_empty_fields() {
        let condition = ClusterOperatorStatusCondition::new(ConditionType::Failing, ConditionStatus::True)
            .with_reason("MissingDependency", "");

        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"type": "Failing", "status": "True", "reason": "MissingDependency"})
        );
    }

    #[test]
    fn test_operand_version_display() {
        assert_eq!(OperandVersion::new("operator", "4.1.0").to_string(), "operator: 4.1.0");
    }
}
