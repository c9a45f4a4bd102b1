//! Permission evaluation.
//!
//! Composes phase resolution, the grant validator, resource-state
//! predicates, and the action matrix into a single allow/deny decision.
//! Decisions are pure except for the audit-log side effects on denial
//! and bypass; they never mutate domain state.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::audit_log::AuditLogEntry;
use crate::models::boat::RegistrationStatus;
use crate::models::permission::{default_permissions, PermissionDecision, PermissionMatrix};
use crate::models::system_config::RegistrationPhase;
use crate::ports::AuditSink;
use crate::services::config::ConfigService;
use crate::services::phase::resolve_phase;
use crate::services::temporary_access::GrantValidator;

/// The authenticated actor of a request.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_admin: bool,
}

/// State of the resource an action targets, supplied by the caller from
/// a consistent snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceSnapshot {
    /// The target crew member holds a seat in some boat.
    pub member_assigned: bool,
    /// Status of the target boat, when the action targets one.
    pub boat_status: Option<RegistrationStatus>,
}

impl ResourceSnapshot {
    /// Snapshot for actions without a resource target.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_member(assigned: bool) -> Self {
        Self {
            member_assigned: assigned,
            boat_status: None,
        }
    }

    pub fn for_boat(status: RegistrationStatus) -> Self {
        Self {
            member_assigned: false,
            boat_status: Some(status),
        }
    }
}

/// A permission question: may this actor perform this action right now?
#[derive(Debug, Clone)]
pub struct PermissionRequest<'a> {
    pub action: &'a str,
    pub actor: Actor,
    /// Team the actor acts on behalf of, for admin impersonation.
    pub impersonated_team: Option<Uuid>,
    pub resource: ResourceSnapshot,
}

/// Evaluates permission requests against the configured matrix.
pub struct PermissionEvaluator {
    config: Arc<ConfigService>,
    grants: GrantValidator,
    audit: Arc<dyn AuditSink>,
    defaults: PermissionMatrix,
}

impl PermissionEvaluator {
    pub fn new(
        config: Arc<ConfigService>,
        grants: GrantValidator,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            config,
            grants,
            audit,
            defaults: default_permissions(),
        }
    }

    /// Decide whether the requested action is currently permitted.
    pub async fn evaluate(
        &self,
        request: &PermissionRequest<'_>,
        now: DateTime<Utc>,
    ) -> PermissionDecision {
        // An unavailable or malformed date config fails closed to the
        // most restrictive phase. The error is reported, never silently
        // widened to "allow".
        let phase = match self.config.system_config(now).await {
            Ok(config) => resolve_phase(now, &config),
            Err(err) => {
                tracing::error!(error = %err, "phase resolution failed, failing closed");
                RegistrationPhase::BeforeRegistration
            }
        };

        // Admin impersonation bypasses every phase and state rule, but is
        // always audited.
        if let Some(team) = request.impersonated_team {
            if request.actor.is_admin {
                self.append_audit(AuditLogEntry::bypass(
                    request.actor.user_id,
                    Some(team),
                    request.action,
                    phase,
                    "admin impersonation",
                    now,
                ))
                .await;
                return PermissionDecision::bypass("admin impersonation");
            }
            return self
                .deny(request, phase, "impersonation requires administrator privileges", now)
                .await;
        }

        // An active temporary access grant makes the action
        // unconditionally allowed, recorded as a bypass.
        if self
            .grants
            .has_active_grant(request.actor.user_id, now)
            .await
        {
            self.append_audit(AuditLogEntry::bypass(
                request.actor.user_id,
                None,
                request.action,
                phase,
                "active temporary access grant",
                now,
            ))
            .await;
            return PermissionDecision::bypass("active temporary access grant");
        }

        let matrix = match self.config.permission_matrix(now).await {
            Ok(matrix) => matrix,
            Err(err) => {
                tracing::error!(error = %err, "permission matrix unavailable, using defaults");
                self.defaults.clone()
            }
        };

        let rule = match matrix
            .rule_for(request.action)
            .or_else(|| self.defaults.rule_for(request.action))
        {
            Some(rule) => *rule,
            None => {
                let reason = format!("unknown action '{}'", request.action);
                return self.deny(request, phase, reason, now).await;
            }
        };

        if !rule.allows(phase) {
            let reason = format!(
                "action '{}' is not permitted during {}",
                request.action, phase
            );
            return self.deny(request, phase, reason, now).await;
        }

        if rule.requires_not_assigned && request.resource.member_assigned {
            return self
                .deny(request, phase, "crew member is currently assigned to a boat", now)
                .await;
        }

        if rule.requires_not_paid
            && request.resource.boat_status == Some(RegistrationStatus::Paid)
        {
            return self
                .deny(request, phase, "boat has been paid and is locked", now)
                .await;
        }

        PermissionDecision::allow()
    }

    async fn deny(
        &self,
        request: &PermissionRequest<'_>,
        phase: RegistrationPhase,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> PermissionDecision {
        let reason = reason.into();
        self.append_audit(AuditLogEntry::denial(
            request.actor.user_id,
            request.action,
            phase,
            reason.clone(),
            now,
        ))
        .await;
        PermissionDecision::deny(reason)
    }

    /// Fire-and-forget audit append. A failed write can never mask or
    /// alter the permission decision.
    async fn append_audit(&self, entry: AuditLogEntry) {
        if let Err(err) = self.audit.append(entry).await {
            tracing::warn!(error = %err, "failed to append audit entry");
        }
    }
}
