// SPDX-FileCopyrightText: 2025 Timothy Pogue
//
// SPDX-License-Identifier: ISC

use chrono::{DateTime, Utc};

use crate::crd::v1alpha1::pushsecret::{
    ConditionStatus, PushSecretConditionType, PushSecretStatus, PushSecretStatusCondition,
};
use crate::error::Result;
use crate::provider::ValidationResult;

pub static REASON_SYNCED: &str = "Synced";
pub static REASON_PENDING: &str = "Pending";
pub static REASON_ERRORED: &str = "Errored";


impl PushSecretStatusCondition {
    /// Build the Ready condition for a validation or push outcome
    ///
    /// The error text, when there is one, becomes the condition message.
    pub fn readiness(outcome: &Result<ValidationResult>, now: DateTime<Utc>) -> Self {
        let (status, reason, message) = match outcome {
            Ok(ValidationResult::Ready) => (ConditionStatus::True, REASON_SYNCED, None),
            Ok(ValidationResult::Unknown) => (
                ConditionStatus::Unknown,
                REASON_PENDING,
                Some("store can not be validated until its namespace is known".to_string()),
            ),
            Ok(ValidationResult::Error) => (ConditionStatus::False, REASON_ERRORED, None),
            Err(e) => (ConditionStatus::False, REASON_ERRORED, Some(e.to_string())),
        };

        PushSecretStatusCondition {
            type_: PushSecretConditionType::Ready,
            status,
            reason: Some(reason.to_string()),
            message,
            last_transition_time: Some(now),
        }
    }
}

impl PushSecretStatus {
    pub fn ready_condition(&self) -> Option<&PushSecretStatusCondition> {
        self.conditions
            .iter()
            .find(|condition| condition.type_ == PushSecretConditionType::Ready)
    }

    /// Return a copy of this status with `condition` replacing any condition
    /// of the same type. The previous transition time is kept when the
    /// condition's status did not change.
    pub fn with_condition(mut self, mut condition: PushSecretStatusCondition) -> Self {
        match self.conditions.iter_mut().find(|existing| existing.type_ == condition.type_) {
            Some(existing) => {
                if existing.status == condition.status {
                    condition.last_transition_time = existing.last_transition_time;
                }
                *existing = condition;
            },
            None => self.conditions.push(condition),
        }
        self
    }

    /// Record a successful push of the given source Secret resource version
    pub fn synced(mut self, resource_version: &str, now: DateTime<Utc>) -> Self {
        self.refresh_time = Some(now);
        self.synced_resource_version = resource_version.to_string();
        self.with_condition(PushSecretStatusCondition::readiness(&Ok(ValidationResult::Ready), now))
    }

    /// Whether the source Secret changed since the last successful push
    pub fn needs_sync(&self, resource_version: &str) -> bool {
        self.synced_resource_version.is_empty() || self.synced_resource_version != resource_version
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::error::PushSecretError;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn readiness_maps_tri_state() {
        let ready = PushSecretStatusCondition::readiness(&Ok(ValidationResult::Ready), at(1));
        let unknown = PushSecretStatusCondition::readiness(&Ok(ValidationResult::Unknown), at(1));
        let denied = PushSecretStatusCondition::readiness(&Err(PushSecretError::AccessDenied("apps".to_string())), at(1));

        assert_eq!((ready.status, ready.reason.as_deref()), (ConditionStatus::True, Some("Synced")));
        assert_eq!((unknown.status, unknown.reason.as_deref()), (ConditionStatus::Unknown, Some("Pending")));
        assert_eq!((denied.status, denied.reason.as_deref()), (ConditionStatus::False, Some("Errored")));
        assert_eq!(denied.message.as_deref(), Some("client is not allowed to get secrets in namespace `apps`"));
    }

    #[test]
    fn with_condition_replaces_same_type() {
        let status = PushSecretStatus::default()
            .with_condition(PushSecretStatusCondition::readiness(&Ok(ValidationResult::Unknown), at(1)))
            .with_condition(PushSecretStatusCondition::readiness(&Err(PushSecretError::MissingTrustMaterial), at(2)));

        assert_eq!(status.conditions.len(), 1);
        let ready = status.ready_condition().unwrap();
        assert_eq!(ready.status, ConditionStatus::False);
        assert_eq!(ready.last_transition_time, Some(at(2)));
    }

    #[test]
    fn transition_time_kept_while_status_unchanged() {
        let status = PushSecretStatus::default()
            .with_condition(PushSecretStatusCondition::readiness(&Err(PushSecretError::MissingTrustMaterial), at(1)))
            .with_condition(PushSecretStatusCondition::readiness(&Err(PushSecretError::AccessDenied("apps".to_string())), at(5)));

        let ready = status.ready_condition().unwrap();
        assert_eq!(ready.last_transition_time, Some(at(1)));
        assert!(ready.message.as_deref().unwrap().contains("apps"));
    }

    #[test]
    fn synced_records_version_and_readiness() {
        let status = PushSecretStatus::default();
        assert!(status.needs_sync("42"));

        let status = status.synced("42", at(10));

        assert!(!status.needs_sync("42"));
        assert!(status.needs_sync("43"));
        assert_eq!(status.refresh_time, Some(at(10)));
        assert_eq!(status.ready_condition().map(|c| c.status), Some(ConditionStatus::True));
    }
}
