//! Crew member endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::{CrewMember, Gender};
use domain::services::permission::ResourceSnapshot;
use persistence::repositories::{BoatRegistrationRepository, CrewMemberRepository};
use shared::validation::{validate_club_name, validate_date_of_birth, validate_name};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::TeamAuth;
use crate::routes::authorize;

#[derive(Debug, Deserialize, Validate)]
pub struct CrewMemberRequest {
    #[validate(custom(function = "validate_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_name"))]
    pub last_name: String,
    #[validate(custom(function = "validate_date_of_birth"))]
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[validate(custom(function = "validate_club_name"))]
    pub club_affiliation: String,
}

/// Load a member and check it belongs to the team the request acts for.
async fn load_owned_member(
    state: &AppState,
    auth: &TeamAuth,
    member_id: Uuid,
) -> Result<CrewMember, ApiError> {
    let member = CrewMemberRepository::new(state.pool.clone())
        .find_by_id(member_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Crew member not found".to_string()))?
        .into_domain()?;
    if member.team_id != auth.effective_team() {
        return Err(ApiError::NotFound("Crew member not found".to_string()));
    }
    Ok(member)
}

/// Register a crew member.
///
/// POST /api/v1/crew-members
pub async fn create_member(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Json(request): Json<CrewMemberRequest>,
) -> Result<(StatusCode, Json<CrewMember>), ApiError> {
    authorize(&state, &auth, "crew_member.create", ResourceSnapshot::none()).await?;
    request.validate()?;

    let entity = CrewMemberRepository::new(state.pool.clone())
        .insert(
            auth.effective_team(),
            request.first_name.trim(),
            request.last_name.trim(),
            request.date_of_birth,
            &request.gender.to_string(),
            request.club_affiliation.trim(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(entity.into_domain()?)))
}

/// List the team's crew members.
///
/// GET /api/v1/crew-members
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
) -> Result<Json<Vec<CrewMember>>, ApiError> {
    let members = CrewMemberRepository::new(state.pool.clone())
        .list_by_team(auth.effective_team())
        .await?
        .into_iter()
        .map(|e| e.into_domain().map_err(ApiError::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(members))
}

/// GET /api/v1/crew-members/:member_id
pub async fn get_member(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<CrewMember>, ApiError> {
    let member = load_owned_member(&state, &auth, member_id).await?;
    Ok(Json(member))
}

/// Update a crew member's details. Denied while the member is seated in a
/// boat: vacate the seat first so derived boat state cannot go stale.
///
/// PUT /api/v1/crew-members/:member_id
pub async fn update_member(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(member_id): Path<Uuid>,
    Json(request): Json<CrewMemberRequest>,
) -> Result<Json<CrewMember>, ApiError> {
    let member = load_owned_member(&state, &auth, member_id).await?;
    authorize(
        &state,
        &auth,
        "crew_member.edit",
        ResourceSnapshot::for_member(member.is_assigned()),
    )
    .await?;
    request.validate()?;

    let updated = CrewMemberRepository::new(state.pool.clone())
        .update(
            member.id,
            request.first_name.trim(),
            request.last_name.trim(),
            request.date_of_birth,
            &request.gender.to_string(),
            request.club_affiliation.trim(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Crew member not found".to_string()))?;
    Ok(Json(updated.into_domain()?))
}

/// Delete a crew member. Denied while the member is seated in a boat.
///
/// DELETE /api/v1/crew-members/:member_id
pub async fn delete_member(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(member_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let member = load_owned_member(&state, &auth, member_id).await?;
    authorize(
        &state,
        &auth,
        "crew_member.delete",
        ResourceSnapshot::for_member(member.is_assigned()),
    )
    .await?;

    // A bypass (impersonation or access grant) can delete a seated
    // member; vacate the seat so the boat never references a vanished id.
    if let Some(boat_id) = member.assigned_boat_id {
        let boats = BoatRegistrationRepository::new(state.pool.clone());
        if let Some(entity) = boats.find_by_id(boat_id).await? {
            let mut boat = entity.into_domain()?;
            for seat in &mut boat.seats {
                if seat.crew_member_id == Some(member.id) {
                    seat.crew_member_id = None;
                }
            }
            if !boat.registration_status.is_terminal() {
                boat.registration_status = domain::models::RegistrationStatus::Incomplete;
            }
            boats.update(&boat).await?;
        }
    }

    CrewMemberRepository::new(state.pool.clone())
        .delete(member.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
