//! HTTP route handlers.

pub mod admin;
pub mod boats;
pub mod crew_members;
pub mod health;
pub mod races;

use chrono::Utc;

use domain::services::permission::{Actor, PermissionRequest, ResourceSnapshot};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::TeamAuth;

/// Run the permission evaluator for the request and turn a denial into a
/// 403. Denials and bypasses are audited inside the evaluator.
pub(crate) async fn authorize(
    state: &AppState,
    auth: &TeamAuth,
    action: &str,
    resource: ResourceSnapshot,
) -> Result<(), ApiError> {
    let request = PermissionRequest {
        action,
        actor: Actor {
            user_id: auth.team_id,
            is_admin: auth.is_admin,
        },
        impersonated_team: auth.impersonated_team,
        resource,
    };
    let decision = state.permissions.evaluate(&request, Utc::now()).await;
    if decision.allowed {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            decision
                .reason
                .unwrap_or_else(|| "action is not permitted".to_string()),
        ))
    }
}
