//! Ordered structural equality.
//!
//! Used for both version drift detection and write suppression. Lists are
//! compared element by element in order; there are no set semantics.

use crds::{ClusterOperatorStatus, ClusterOperatorStatusCondition, ObjectReference, OperandVersion};

/// Compare two sequences in order with the given element comparison.
pub fn ordered_eq<T, F>(left: &[T], right: &[T], eq: F) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| eq(l, r))
}

pub fn operand_versions_eq(left: &[OperandVersion], right: &[OperandVersion]) -> bool {
    ordered_eq(left, right, |l, r| l.name == r.name && l.version == r.version)
}

fn conditions_eq(left: &[ClusterOperatorStatusCondition], right: &[ClusterOperatorStatusCondition]) -> bool {
    ordered_eq(left, right, |l, r| {
        l.type_ == r.type_
            && l.status == r.status
            && l.reason == r.reason
            && l.message == r.message
            && l.last_transition_time == r.last_transition_time
    })
}

fn related_objects_eq(left: &[ObjectReference], right: &[ObjectReference]) -> bool {
    ordered_eq(left, right, |l, r| {
        l.group == r.group && l.resource == r.resource && l.namespace == r.namespace && l.name == r.name
    })
}

/// Deep equality of two status payloads.
///
/// A missing status equals an empty one, matching how an absent status
/// sub-object reads back from the store.
pub fn status_eq(left: Option<&ClusterOperatorStatus>, right: Option<&ClusterOperatorStatus>) -> bool {
    let empty = ClusterOperatorStatus::default();
    let left = left.unwrap_or(&empty);
    let right = right.unwrap_or(&empty);

    conditions_eq(&left.conditions, &right.conditions)
        && operand_versions_eq(&left.versions, &right.versions)
        && related_objects_eq(&left.related_objects, &right.related_objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::{ConditionStatus, ConditionType};

    fn versions(pairs: &[(&str, &str)]) -> Vec<OperandVersion> {
        pairs.iter().map(|(n, v)| OperandVersion::new(*n, *v)).collect()
    }

    #[test]
    fn test_identical_lists_are_equal() {
        let a = versions(&[("operator", "4.1.0"), ("cluster-autoscaler", "4.1.0")]);
        assert!(operand_versions_eq(&a, &a.clone()));
        assert!(operand_versions_eq(&[], &[]));
    }

    #[test]
    fn test_permutation_differs() {
        let a = versions(&[("operator", "4.1.0"), ("cluster-autoscaler", "4.1.0")]);
        let b = versions(&[("cluster-autoscaler", "4.1.0"), ("operator", "4.1.0")]);
        assert!(!operand_versions_eq(&a, &b));
    }

    #[test]
    fn test_added_or_removed_entry_differs() {
        let a = versions(&[("operator", "4.1.0")]);
        let b = versions(&[("operator", "4.1.0"), ("cluster-autoscaler", "4.1.0")]);
        assert!(!operand_versions_eq(&a, &b));
        assert!(!operand_versions_eq(&b, &a));
        assert!(!operand_versions_eq(&a, &[]));
    }

    #[test]
    fn test_changed_field_differs() {
        let a = versions(&[("operator", "4.1.0")]);
        assert!(!operand_versions_eq(&a, &versions(&[("operator", "4.1.1")])));
        assert!(!operand_versions_eq(&a, &versions(&[("operand", "4.1.0")])));
    }

    #[test]
    fn test_missing_status_equals_empty_status() {
        assert!(status_eq(None, Some(&ClusterOperatorStatus::default())));
        assert!(status_eq(None, None));
    }

    #[test]
    fn test_status_differs_on_condition_message() {
        let condition = ClusterOperatorStatusCondition::new(ConditionType::Failing, ConditionStatus::True);
        let a = ClusterOperatorStatus {
            conditions: vec![condition.clone().with_reason("MissingDependency", "one")],
            ..Default::default()
        };
        let b = ClusterOperatorStatus {
            conditions: vec![condition.with_reason("MissingDependency", "two")],
            ..Default::default()
        };
        assert!(status_eq(Some(&a), Some(&a.clone())));
        assert!(!status_eq(Some(&a), Some(&b)));
    }

    #[test]
    fn test_status_differs_on_related_objects() {
        let a = ClusterOperatorStatus {
            related_objects: vec![ObjectReference::namespace("a")],
            ..Default::default()
        };
        assert!(!status_eq(Some(&a), None));
    }
}
