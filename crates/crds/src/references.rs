//! Object references for related objects
//!
//! Points at resources that are useful when debugging an operator
//! (its namespace, its own custom resources, and so on). Follows the
//! group/resource/namespace/name shape used by ClusterOperator status.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference to a related Kubernetes object
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    /// API group of the referenced resource (empty for the core group)
    #[serde(default)]
    pub group: String,

    /// Plural resource name (e.g., "namespaces", "deployments")
    pub resource: String,

    /// Namespace of the referenced object (None for cluster-scoped objects)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Name of the referenced object
    pub name: String,
}

impl ObjectReference {
    /// Create a reference to a cluster-scoped object
    pub fn new(group: impl Into<String>, resource: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            resource: resource.into(),
            namespace: None,
            name: name.into(),
        }
    }

    /// Helper to reference a namespace in the core API group
    pub fn namespace(name: impl Into<String>) -> Self {
        Self::new("", "namespaces", name)
    }
}
