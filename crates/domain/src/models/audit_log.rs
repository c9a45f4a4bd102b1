//! Append-only audit log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::system_config::RegistrationPhase;

/// Kind of audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    /// A permission check denied an action.
    Denial,
    /// An action skipped the normal phase/state checks (impersonation or
    /// active temporary access grant).
    Bypass,
    /// An admin changed a configuration document.
    ConfigChange,
}

impl std::fmt::Display for AuditKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditKind::Denial => write!(f, "denial"),
            AuditKind::Bypass => write!(f, "bypass"),
            AuditKind::ConfigChange => write!(f, "config_change"),
        }
    }
}

/// A single audit record. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub kind: AuditKind,
    pub actor: Uuid,
    /// Team the actor was impersonating, for admin bypasses.
    pub impersonated: Option<Uuid>,
    pub action: String,
    pub phase: Option<RegistrationPhase>,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn denial(
        actor: Uuid,
        action: &str,
        phase: RegistrationPhase,
        detail: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: AuditKind::Denial,
            actor,
            impersonated: None,
            action: action.to_string(),
            phase: Some(phase),
            detail: detail.into(),
            timestamp: now,
        }
    }

    pub fn bypass(
        actor: Uuid,
        impersonated: Option<Uuid>,
        action: &str,
        phase: RegistrationPhase,
        detail: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: AuditKind::Bypass,
            actor,
            impersonated,
            action: action.to_string(),
            phase: Some(phase),
            detail: detail.into(),
            timestamp: now,
        }
    }

    pub fn config_change(
        actor: Uuid,
        domain: &str,
        detail: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: AuditKind::ConfigChange,
            actor,
            impersonated: None,
            action: format!("config.{}", domain.to_lowercase()),
            phase: None,
            detail: detail.into(),
            timestamp: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_entry() {
        let actor = Uuid::new_v4();
        let entry = AuditLogEntry::denial(
            actor,
            "boat.edit",
            RegistrationPhase::AfterPaymentDeadline,
            "boat is paid",
            Utc::now(),
        );
        assert_eq!(entry.kind, AuditKind::Denial);
        assert_eq!(entry.actor, actor);
        assert_eq!(entry.phase, Some(RegistrationPhase::AfterPaymentDeadline));
        assert!(entry.impersonated.is_none());
    }

    #[test]
    fn test_bypass_entry_records_impersonation() {
        let team = Uuid::new_v4();
        let entry = AuditLogEntry::bypass(
            Uuid::new_v4(),
            Some(team),
            "crew_member.edit",
            RegistrationPhase::AfterRegistration,
            "admin impersonation",
            Utc::now(),
        );
        assert_eq!(entry.kind, AuditKind::Bypass);
        assert_eq!(entry.impersonated, Some(team));
    }

    #[test]
    fn test_config_change_action_name() {
        let entry = AuditLogEntry::config_change(
            Uuid::new_v4(),
            "PRICING",
            "updated base seat price",
            Utc::now(),
        );
        assert_eq!(entry.action, "config.pricing");
        assert_eq!(entry.kind, AuditKind::ConfigChange);
        assert!(entry.phase.is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(AuditKind::Denial.to_string(), "denial");
        assert_eq!(AuditKind::ConfigChange.to_string(), "config_change");
    }
}
