//! Race schedule endpoint handlers.

use axum::{extract::State, Json};

use domain::models::Race;
use persistence::repositories::RaceRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// List the full race schedule.
///
/// GET /api/v1/races
pub async fn list_races(State(state): State<AppState>) -> Result<Json<Vec<Race>>, ApiError> {
    let races = RaceRepository::new(state.pool.clone())
        .list()
        .await?
        .into_iter()
        .map(|e| e.into_domain().map_err(ApiError::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(races))
}
