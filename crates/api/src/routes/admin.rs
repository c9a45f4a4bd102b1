//! Admin endpoint handlers: configuration documents, temporary access
//! grants, audit log listing, and the payment-status collaborator hook.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::models::{GrantStatus, RegistrationStatus, TemporaryAccessGrant};
use domain::ports::{ConfigDomain, ConfigStore, GrantStore};
use persistence::repositories::{
    AuditLogRepository, BoatRegistrationRepository, ConfigRepository, GrantRepository,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::TeamAuth;

#[derive(Debug, Deserialize)]
pub struct GrantAccessRequest {
    pub user_id: Uuid,
    /// Hours until expiry; defaults to the configured grant duration.
    pub hours: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub actor: Option<Uuid>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AuditEntryResponse {
    pub id: Uuid,
    pub kind: String,
    pub actor: Uuid,
    pub impersonated: Option<Uuid>,
    pub action: String,
    pub phase: Option<String>,
    pub detail: String,
    pub timestamp: chrono::DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SetBoatStatusRequest {
    pub status: RegistrationStatus,
}

fn parse_domain(raw: &str) -> Result<ConfigDomain, ApiError> {
    match raw.to_uppercase().as_str() {
        "SYSTEM" => Ok(ConfigDomain::System),
        "PRICING" => Ok(ConfigDomain::Pricing),
        "PERMISSIONS" => Ok(ConfigDomain::Permissions),
        _ => Err(ApiError::Validation(format!(
            "unknown configuration domain '{raw}'"
        ))),
    }
}

/// Fetch the raw configuration document for a domain.
///
/// GET /api/v1/admin/config/:domain
pub async fn get_config(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let domain = parse_domain(&domain)?;
    let store = ConfigRepository::new(state.pool.clone());
    let value = store
        .get(domain)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{domain} configuration is not set")))?;
    Ok(Json(value))
}

/// Replace a configuration document. Validated before the write; the
/// change is audited and the read cache invalidated.
///
/// PUT /api/v1/admin/config/:domain
pub async fn put_config(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(domain): Path<String>,
    Json(value): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let domain = parse_domain(&domain)?;
    let stored = state
        .configs
        .update(domain, value, auth.team_id, Utc::now())
        .await?;
    Ok(Json(stored))
}

/// Issue a temporary access grant, overwriting any previous grant for
/// the user.
///
/// POST /api/v1/admin/grants
pub async fn grant_access(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Json(request): Json<GrantAccessRequest>,
) -> Result<(StatusCode, Json<TemporaryAccessGrant>), ApiError> {
    let now = Utc::now();
    let hours = match request.hours {
        Some(hours) if hours > 0 => hours,
        Some(_) => {
            return Err(ApiError::Validation(
                "hours must be greater than zero".to_string(),
            ))
        }
        None => state.configs.system_config(now).await?.temp_access_default_hours,
    };

    let grant = TemporaryAccessGrant::issue(request.user_id, auth.team_id, now, hours);
    GrantRepository::new(state.pool.clone()).put(grant.clone()).await?;
    Ok((StatusCode::CREATED, Json(grant)))
}

/// Revoke a user's grant. Revoking an already expired or revoked grant
/// is a no-op that reports the current record.
///
/// DELETE /api/v1/admin/grants/:user_id
pub async fn revoke_access(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<TemporaryAccessGrant>, ApiError> {
    let repo = GrantRepository::new(state.pool.clone());
    let grant = repo
        .get(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No grant exists for this user".to_string()))?;

    if grant.status != GrantStatus::Active {
        return Ok(Json(grant));
    }

    let revoked = grant.revoked();
    repo.put(revoked.clone()).await?;
    Ok(Json(revoked))
}

/// List recent audit entries, newest first.
///
/// GET /api/v1/admin/audit
pub async fn list_audit(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEntryResponse>>, ApiError> {
    let limit = query.limit.unwrap_or(100).clamp(1, 1000);
    let entries = AuditLogRepository::new(state.pool.clone())
        .list(query.actor, limit)
        .await?
        .into_iter()
        .map(|e| AuditEntryResponse {
            id: e.id,
            kind: e.kind,
            actor: e.actor,
            impersonated: e.impersonated,
            action: e.action,
            phase: e.phase,
            detail: e.detail,
            timestamp: e.timestamp,
        })
        .collect();
    Ok(Json(entries))
}

/// Collaborator hook for payment and forfeit transitions. Only the two
/// terminal statuses can be written here; everything else is derived.
///
/// POST /api/v1/admin/boats/:boat_id/status
pub async fn set_boat_status(
    State(state): State<AppState>,
    Path(boat_id): Path<Uuid>,
    Json(request): Json<SetBoatStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !request.status.is_terminal() {
        return Err(ApiError::Validation(
            "only 'paid' and 'forfeit' can be set directly".to_string(),
        ));
    }

    let repo = BoatRegistrationRepository::new(state.pool.clone());
    let updated = repo
        .set_status(boat_id, &request.status.to_string())
        .await?;
    if !updated {
        return Err(ApiError::NotFound("Boat not found".to_string()));
    }
    Ok(Json(serde_json::json!({
        "boat_id": boat_id,
        "registration_status": request.status,
    })))
}
