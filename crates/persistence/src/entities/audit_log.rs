//! Audit log entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for audit log rows. Append-only.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogEntity {
    /// Unique identifier.
    pub id: Uuid,

    /// Kind of event (denial, bypass, config_change).
    pub kind: String,

    /// Actor who triggered the event.
    pub actor: Uuid,

    /// Team the actor was impersonating, for admin bypasses.
    pub impersonated: Option<Uuid>,

    /// Action evaluated (format: resource.operation).
    pub action: String,

    /// Registration phase at evaluation time, when applicable.
    pub phase: Option<String>,

    /// Human-readable detail (failing rule or bypass justification).
    pub detail: String,

    /// Timestamp when the event occurred.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_log_entity_creation() {
        let entity = AuditLogEntity {
            id: Uuid::new_v4(),
            kind: "denial".to_string(),
            actor: Uuid::new_v4(),
            impersonated: None,
            action: "boat.edit".to_string(),
            phase: Some("after_payment_deadline".to_string()),
            detail: "boat has been paid and is locked".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(entity.kind, "denial");
        assert_eq!(entity.action, "boat.edit");
        assert!(entity.impersonated.is_none());
    }
}
