//! Action permission matrix and decision types.
//!
//! Actions are named `resource.operation`. Each rule must state an allow
//! flag for every one of the four phases; a configured matrix missing a
//! phase key is rejected at load time rather than defaulted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::system_config::RegistrationPhase;
use crate::error::DomainError;

/// Per-action rule: one allow flag per phase plus optional resource-state
/// requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActionRule {
    pub before_registration: bool,
    pub during_registration: bool,
    pub after_registration: bool,
    pub after_payment_deadline: bool,
    /// The target crew member must not be assigned to a boat.
    #[serde(default)]
    pub requires_not_assigned: bool,
    /// The target boat must not be in `paid` status.
    #[serde(default)]
    pub requires_not_paid: bool,
}

impl ActionRule {
    pub fn allows(&self, phase: RegistrationPhase) -> bool {
        match phase {
            RegistrationPhase::BeforeRegistration => self.before_registration,
            RegistrationPhase::DuringRegistration => self.during_registration,
            RegistrationPhase::AfterRegistration => self.after_registration,
            RegistrationPhase::AfterPaymentDeadline => self.after_payment_deadline,
        }
    }
}

/// Action name to rule mapping, loaded from configuration with the
/// hard-coded default table as fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMatrix {
    pub actions: HashMap<String, ActionRule>,
}

impl PermissionMatrix {
    pub fn rule_for(&self, action: &str) -> Option<&ActionRule> {
        self.actions.get(action)
    }

    /// Parse a configured matrix document. Serde rejects entries missing
    /// any of the four phase flags.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, DomainError> {
        serde_json::from_value(value.clone())
            .map_err(|e| DomainError::configuration(format!("malformed permission matrix: {e}")))
    }
}

/// Hard-coded fallback matrix used when no matrix document is configured.
pub fn default_permissions() -> PermissionMatrix {
    let during_only = ActionRule {
        before_registration: false,
        during_registration: true,
        after_registration: false,
        after_payment_deadline: false,
        requires_not_assigned: false,
        requires_not_paid: false,
    };
    let until_deadline = ActionRule {
        before_registration: false,
        during_registration: true,
        after_registration: true,
        after_payment_deadline: false,
        requires_not_assigned: false,
        requires_not_paid: false,
    };

    let mut actions = HashMap::new();
    actions.insert("boat.create".to_string(), during_only);
    actions.insert(
        "boat.edit".to_string(),
        ActionRule {
            requires_not_paid: true,
            ..until_deadline
        },
    );
    actions.insert(
        "boat.delete".to_string(),
        ActionRule {
            requires_not_paid: true,
            ..during_only
        },
    );
    actions.insert(
        "boat.assign_seat".to_string(),
        ActionRule {
            requires_not_paid: true,
            ..until_deadline
        },
    );
    actions.insert(
        "boat.select_race".to_string(),
        ActionRule {
            requires_not_paid: true,
            ..during_only
        },
    );
    actions.insert(
        "boat.set_rental".to_string(),
        ActionRule {
            requires_not_paid: true,
            ..until_deadline
        },
    );
    actions.insert("crew_member.create".to_string(), during_only);
    actions.insert("crew_member.edit".to_string(), until_deadline);
    actions.insert(
        "crew_member.delete".to_string(),
        ActionRule {
            requires_not_assigned: true,
            ..during_only
        },
    );

    PermissionMatrix { actions }
}

/// Outcome of a permission evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PermissionDecision {
    pub allowed: bool,
    /// Failing rule on denial, or the bypass justification.
    pub reason: Option<String>,
    /// Whether normal phase/state checks were skipped.
    pub bypass: bool,
}

impl PermissionDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            bypass: false,
        }
    }

    pub fn bypass(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: Some(reason.into()),
            bypass: true,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            bypass: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matrix_covers_known_actions() {
        let matrix = default_permissions();
        for action in [
            "boat.create",
            "boat.edit",
            "boat.delete",
            "boat.assign_seat",
            "boat.select_race",
            "boat.set_rental",
            "crew_member.create",
            "crew_member.edit",
            "crew_member.delete",
        ] {
            assert!(matrix.rule_for(action).is_some(), "missing {action}");
        }
        assert!(matrix.rule_for("boat.teleport").is_none());
    }

    #[test]
    fn test_default_rules_state_requirements() {
        let matrix = default_permissions();
        assert!(matrix.rule_for("crew_member.delete").unwrap().requires_not_assigned);
        assert!(matrix.rule_for("boat.edit").unwrap().requires_not_paid);
        assert!(!matrix.rule_for("crew_member.edit").unwrap().requires_not_paid);
    }

    #[test]
    fn test_rule_allows_per_phase() {
        let rule = default_permissions()
            .rule_for("boat.assign_seat")
            .copied()
            .unwrap();
        assert!(!rule.allows(RegistrationPhase::BeforeRegistration));
        assert!(rule.allows(RegistrationPhase::DuringRegistration));
        assert!(rule.allows(RegistrationPhase::AfterRegistration));
        assert!(!rule.allows(RegistrationPhase::AfterPaymentDeadline));
    }

    #[test]
    fn test_matrix_from_value_requires_all_phases() {
        let missing_phase = serde_json::json!({
            "boat.create": {
                "before_registration": false,
                "during_registration": true,
                "after_registration": false
            }
        });
        let err = PermissionMatrix::from_value(&missing_phase).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));

        let complete = serde_json::json!({
            "boat.create": {
                "before_registration": false,
                "during_registration": true,
                "after_registration": false,
                "after_payment_deadline": false,
                "requires_not_paid": true
            }
        });
        let matrix = PermissionMatrix::from_value(&complete).unwrap();
        assert!(matrix.rule_for("boat.create").unwrap().requires_not_paid);
    }

    #[test]
    fn test_decision_constructors() {
        assert!(PermissionDecision::allow().allowed);
        let deny = PermissionDecision::deny("phase closed");
        assert!(!deny.allowed);
        assert_eq!(deny.reason.as_deref(), Some("phase closed"));
        let bypass = PermissionDecision::bypass("admin impersonation");
        assert!(bypass.allowed);
        assert!(bypass.bypass);
    }
}
