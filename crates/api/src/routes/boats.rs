//! Boat registration endpoint handlers.
//!
//! Every mutating handler follows the same shape: authenticate, ask the
//! permission evaluator, apply the change, recompute the boat's derived
//! status and club display from a fresh crew snapshot, persist.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use domain::models::{BoatRegistration, CrewMember, HullType, PricingBreakdown, Race};
use domain::services::boat_status::{aggregate_clubs, resolve_status};
use domain::services::eligibility::{classify_crew, eligible_races as filter_eligible, validate_race};
use domain::services::permission::ResourceSnapshot;
use domain::services::pricing::price_boat;
use persistence::repositories::{
    BoatRegistrationRepository, CrewMemberRepository, RaceRepository, TeamRepository,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::TeamAuth;
use crate::routes::authorize;

#[derive(Debug, Deserialize)]
pub struct CreateBoatRequest {
    pub event_type: String,
    pub hull_type: HullType,
}

#[derive(Debug, Deserialize)]
pub struct AssignSeatRequest {
    pub position: i32,
    /// Member to seat, or `null` to vacate the position.
    pub crew_member_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRaceRequest {
    pub race_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SetRentalRequest {
    pub is_rental: bool,
}

/// Home club of the team the request operates on. When an admin
/// impersonates another team, the impersonated team's club applies.
async fn effective_home_club(state: &AppState, auth: &TeamAuth) -> Result<String, ApiError> {
    match auth.impersonated_team {
        None => Ok(auth.home_club.clone()),
        Some(team_id) => {
            let team = TeamRepository::new(state.pool.clone())
                .find_by_id(team_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;
            Ok(team.home_club)
        }
    }
}

/// Load a boat and check it belongs to the team the request acts for.
async fn load_owned_boat(
    state: &AppState,
    auth: &TeamAuth,
    boat_id: Uuid,
) -> Result<BoatRegistration, ApiError> {
    let boat = BoatRegistrationRepository::new(state.pool.clone())
        .find_by_id(boat_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Boat not found".to_string()))?
        .into_domain()?;
    if boat.team_id != auth.effective_team() {
        // Ownership is not leaked; a foreign boat looks absent.
        return Err(ApiError::NotFound("Boat not found".to_string()));
    }
    Ok(boat)
}

/// Crew members currently seated in the boat.
async fn seated_members(
    state: &AppState,
    boat: &BoatRegistration,
) -> Result<Vec<CrewMember>, ApiError> {
    let ids: Vec<Uuid> = boat.filled_seats().filter_map(|s| s.crew_member_id).collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    CrewMemberRepository::new(state.pool.clone())
        .list_by_ids(&ids)
        .await?
        .into_iter()
        .map(|e| e.into_domain().map_err(ApiError::from))
        .collect()
}

/// Recompute the derived status and club display, then persist the boat.
async fn refresh_and_save(
    state: &AppState,
    boat: &mut BoatRegistration,
    home_club: &str,
) -> Result<(), ApiError> {
    let members = seated_members(state, boat).await?;
    let pricing = state.configs.pricing_config(Utc::now()).await?;
    boat.registration_status = resolve_status(boat, &members, &pricing);
    let clubs = aggregate_clubs(boat, &members, home_club);
    boat.club_display = clubs.club_display;
    boat.club_list = clubs.club_list;
    boat.is_multi_club = clubs.is_multi_club;
    BoatRegistrationRepository::new(state.pool.clone())
        .update(boat)
        .await?;
    Ok(())
}

/// Register a new boat with an empty seat layout.
///
/// POST /api/v1/boats
pub async fn create_boat(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Json(request): Json<CreateBoatRequest>,
) -> Result<(StatusCode, Json<BoatRegistration>), ApiError> {
    authorize(&state, &auth, "boat.create", ResourceSnapshot::none()).await?;

    if request.event_type.trim().is_empty() {
        return Err(ApiError::Validation("event_type must not be empty".to_string()));
    }

    let home_club = effective_home_club(&state, &auth).await?;
    let mut boat = BoatRegistration::new(
        Uuid::new_v4(),
        auth.effective_team(),
        request.event_type,
        request.hull_type,
    );
    let clubs = aggregate_clubs(&boat, &[], &home_club);
    boat.club_display = clubs.club_display;
    boat.club_list = clubs.club_list;
    boat.is_multi_club = clubs.is_multi_club;

    BoatRegistrationRepository::new(state.pool.clone())
        .insert(&boat)
        .await?;
    Ok((StatusCode::CREATED, Json(boat)))
}

/// List the team's boats.
///
/// GET /api/v1/boats
pub async fn list_boats(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
) -> Result<Json<Vec<BoatRegistration>>, ApiError> {
    let boats = BoatRegistrationRepository::new(state.pool.clone())
        .list_by_team(auth.effective_team())
        .await?
        .into_iter()
        .map(|e| e.into_domain().map_err(ApiError::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(boats))
}

/// GET /api/v1/boats/:boat_id
pub async fn get_boat(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(boat_id): Path<Uuid>,
) -> Result<Json<BoatRegistration>, ApiError> {
    let boat = load_owned_boat(&state, &auth, boat_id).await?;
    Ok(Json(boat))
}

/// Seat a crew member at a position, or vacate the position.
///
/// PUT /api/v1/boats/:boat_id/seats
pub async fn assign_seat(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(boat_id): Path<Uuid>,
    Json(request): Json<AssignSeatRequest>,
) -> Result<Json<BoatRegistration>, ApiError> {
    let mut boat = load_owned_boat(&state, &auth, boat_id).await?;
    authorize(
        &state,
        &auth,
        "boat.assign_seat",
        ResourceSnapshot::for_boat(boat.registration_status),
    )
    .await?;

    if boat.seat_at(request.position).is_none() {
        return Err(ApiError::Validation(format!(
            "hull {} has no seat at position {}",
            boat.hull_type, request.position
        )));
    }

    let members = CrewMemberRepository::new(state.pool.clone());

    match request.crew_member_id {
        Some(member_id) => {
            let member = members
                .find_by_id(member_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Crew member not found".to_string()))?
                .into_domain()?;
            if member.team_id != boat.team_id {
                return Err(ApiError::Validation(
                    "crew member belongs to a different team".to_string(),
                ));
            }
            match member.assigned_boat_id {
                Some(other) if other != boat.id => {
                    return Err(ApiError::Conflict(
                        "crew member is already seated in another boat".to_string(),
                    ));
                }
                Some(_) => {
                    // Moving within the same boat: vacate the old seat.
                    for seat in &mut boat.seats {
                        if seat.crew_member_id == Some(member_id) {
                            seat.crew_member_id = None;
                        }
                    }
                }
                None => {}
            }

            // Displace a previous occupant of the target seat.
            if let Some(seat) = boat.seat_at_mut(request.position) {
                if let Some(previous) = seat.crew_member_id.take() {
                    if previous != member_id {
                        members.set_assignment(previous, None).await?;
                    }
                }
                seat.crew_member_id = Some(member_id);
            }
            members.set_assignment(member_id, Some(boat.id)).await?;
        }
        None => {
            if let Some(seat) = boat.seat_at_mut(request.position) {
                if let Some(previous) = seat.crew_member_id.take() {
                    members.set_assignment(previous, None).await?;
                }
            }
        }
    }

    let home_club = effective_home_club(&state, &auth).await?;
    refresh_and_save(&state, &mut boat, &home_club).await?;
    Ok(Json(boat))
}

/// Select the race the boat enters, after eligibility validation.
///
/// POST /api/v1/boats/:boat_id/race
pub async fn select_race(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(boat_id): Path<Uuid>,
    Json(request): Json<SelectRaceRequest>,
) -> Result<Json<BoatRegistration>, ApiError> {
    let mut boat = load_owned_boat(&state, &auth, boat_id).await?;
    authorize(
        &state,
        &auth,
        "boat.select_race",
        ResourceSnapshot::for_boat(boat.registration_status),
    )
    .await?;

    let race = RaceRepository::new(state.pool.clone())
        .find_by_id(request.race_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Race not found".to_string()))?
        .into_domain()?;

    let crew = seated_members(&state, &boat).await?;
    let system = state.configs.system_config(Utc::now()).await?;
    let classification = classify_crew(&crew, system.event_day())?;
    validate_race(&classification, &race)?;

    boat.race_id = Some(race.id);
    let home_club = effective_home_club(&state, &auth).await?;
    refresh_and_save(&state, &mut boat, &home_club).await?;
    Ok(Json(boat))
}

/// Races the current crew may enter.
///
/// GET /api/v1/boats/:boat_id/eligible-races
pub async fn eligible_races(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(boat_id): Path<Uuid>,
) -> Result<Json<Vec<Race>>, ApiError> {
    let boat = load_owned_boat(&state, &auth, boat_id).await?;
    let crew = seated_members(&state, &boat).await?;
    let system = state.configs.system_config(Utc::now()).await?;
    let classification = classify_crew(&crew, system.event_day())?;

    let races = RaceRepository::new(state.pool.clone())
        .list()
        .await?
        .into_iter()
        .map(|e| e.into_domain().map_err(ApiError::from))
        .collect::<Result<Vec<_>, _>>()?;

    let eligible: Vec<Race> = filter_eligible(&classification, &races)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(eligible))
}

/// Flag or unflag the boat as a rental.
///
/// POST /api/v1/boats/:boat_id/rental
pub async fn set_rental(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(boat_id): Path<Uuid>,
    Json(request): Json<SetRentalRequest>,
) -> Result<Json<BoatRegistration>, ApiError> {
    let mut boat = load_owned_boat(&state, &auth, boat_id).await?;
    authorize(
        &state,
        &auth,
        "boat.set_rental",
        ResourceSnapshot::for_boat(boat.registration_status),
    )
    .await?;

    boat.is_rental = request.is_rental;
    let home_club = effective_home_club(&state, &auth).await?;
    refresh_and_save(&state, &mut boat, &home_club).await?;
    Ok(Json(boat))
}

/// Itemized fee quote for the boat's current crew.
///
/// GET /api/v1/boats/:boat_id/price
pub async fn price_quote(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(boat_id): Path<Uuid>,
) -> Result<Json<PricingBreakdown>, ApiError> {
    let boat = load_owned_boat(&state, &auth, boat_id).await?;
    let crew = seated_members(&state, &boat).await?;
    let pricing = state.configs.pricing_config(Utc::now()).await?;
    let breakdown = price_boat(&boat, &crew, &pricing)?;
    Ok(Json(breakdown))
}

/// Delete a boat and release its crew.
///
/// DELETE /api/v1/boats/:boat_id
pub async fn delete_boat(
    State(state): State<AppState>,
    Extension(auth): Extension<TeamAuth>,
    Path(boat_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let boat = load_owned_boat(&state, &auth, boat_id).await?;
    authorize(
        &state,
        &auth,
        "boat.delete",
        ResourceSnapshot::for_boat(boat.registration_status),
    )
    .await?;

    CrewMemberRepository::new(state.pool.clone())
        .clear_assignments_for_boat(boat.id)
        .await?;
    BoatRegistrationRepository::new(state.pool.clone())
        .delete(boat.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
