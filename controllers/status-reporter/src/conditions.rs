//! Condition synthesis.
//!
//! Every operator state is published as the same three conditions
//! (Available, Progressing, Failing), always in that order and always all
//! present. Only the statuses and the reason/message of the condition that
//! explains the state vary.

use chrono::{DateTime, SubsecRound, Utc};
use crds::{ClusterOperatorStatusCondition, ConditionStatus, ConditionType};

/// Available, not progressing, not failing.
pub fn available(reason: &str, message: &str) -> Vec<ClusterOperatorStatusCondition> {
    vec![
        ClusterOperatorStatusCondition::new(ConditionType::Available, ConditionStatus::True)
            .with_reason(reason, message),
        ClusterOperatorStatusCondition::new(ConditionType::Progressing, ConditionStatus::False),
        ClusterOperatorStatusCondition::new(ConditionType::Failing, ConditionStatus::False),
    ]
}

/// Failing but still available, not progressing.
pub fn failing(reason: &str, message: &str) -> Vec<ClusterOperatorStatusCondition> {
    vec![
        ClusterOperatorStatusCondition::new(ConditionType::Available, ConditionStatus::True),
        ClusterOperatorStatusCondition::new(ConditionType::Progressing, ConditionStatus::False),
        ClusterOperatorStatusCondition::new(ConditionType::Failing, ConditionStatus::True)
            .with_reason(reason, message),
    ]
}

/// Progressing but still available, not failing.
pub fn progressing(reason: &str, message: &str) -> Vec<ClusterOperatorStatusCondition> {
    vec![
        ClusterOperatorStatusCondition::new(ConditionType::Available, ConditionStatus::True),
        ClusterOperatorStatusCondition::new(ConditionType::Progressing, ConditionStatus::True)
            .with_reason(reason, message),
        ClusterOperatorStatusCondition::new(ConditionType::Failing, ConditionStatus::False),
    ]
}

/// Current time at the precision the API server stores.
pub fn transition_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Insert or replace a condition by type.
///
/// The transition time is kept from the existing condition when its status
/// is unchanged, and set to `now` otherwise.
pub fn set_condition(
    conditions: &mut Vec<ClusterOperatorStatusCondition>,
    mut condition: ClusterOperatorStatusCondition,
    now: DateTime<Utc>,
) {
    match conditions.iter_mut().find(|c| c.type_ == condition.type_) {
        Some(existing) => {
            condition.last_transition_time = if existing.status == condition.status {
                existing.last_transition_time.or(Some(now))
            } else {
                Some(now)
            };
            *existing = condition;
        }
        None => {
            condition.last_transition_time = Some(now);
            conditions.push(condition);
        }
    }
}

/// Build the condition list to publish from the desired set and the
/// currently stored conditions.
///
/// Only the desired conditions are returned; stored conditions serve as the
/// source of carried-over transition times.
pub fn merge_conditions(
    existing: &[ClusterOperatorStatusCondition],
    desired: Vec<ClusterOperatorStatusCondition>,
    now: DateTime<Utc>,
) -> Vec<ClusterOperatorStatusCondition> {
    let mut merged = Vec::with_capacity(desired.len());
    for condition in desired {
        let previous = existing.iter().find(|c| c.type_ == condition.type_);
        if let Some(previous) = previous {
            merged.push(previous.clone());
        }
        set_condition(&mut merged, condition, now);
    }
    merged
}
