//! Boat registration repository.

use domain::models::BoatRegistration;
use domain::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::BoatRegistrationEntity;
use crate::repositories::store_error;

const COLUMNS: &str = "id, team_id, event_type, hull_type, race_id, seats, is_rental, \
     registration_status, club_display, club_list, is_multi_club, created_at, updated_at";

/// Repository for boat registration rows. Seats and the club list are
/// written back as JSONB whenever the boat is saved.
#[derive(Clone)]
pub struct BoatRegistrationRepository {
    pool: PgPool,
}

impl BoatRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, boat: &BoatRegistration) -> Result<(), DomainError> {
        let seats = serde_json::to_value(&boat.seats)
            .map_err(|e| DomainError::store(format!("serializing seats: {e}")))?;
        let club_list = serde_json::to_value(&boat.club_list)
            .map_err(|e| DomainError::store(format!("serializing club list: {e}")))?;
        sqlx::query(
            r#"
            INSERT INTO boat_registrations
                (id, team_id, event_type, hull_type, race_id, seats, is_rental,
                 registration_status, club_display, club_list, is_multi_club)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(boat.id)
        .bind(boat.team_id)
        .bind(&boat.event_type)
        .bind(boat.hull_type.to_string())
        .bind(boat.race_id)
        .bind(seats)
        .bind(boat.is_rental)
        .bind(boat.registration_status.to_string())
        .bind(&boat.club_display)
        .bind(club_list)
        .bind(boat.is_multi_club)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("inserting boat registration", e))?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BoatRegistrationEntity>, sqlx::Error> {
        sqlx::query_as::<_, BoatRegistrationEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM boat_registrations
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_by_team(
        &self,
        team_id: Uuid,
    ) -> Result<Vec<BoatRegistrationEntity>, sqlx::Error> {
        sqlx::query_as::<_, BoatRegistrationEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM boat_registrations
            WHERE team_id = $1
            ORDER BY created_at
            "#,
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Write back the mutable parts of the boat: race selection, seats,
    /// rental flag, status, and the derived club fields.
    pub async fn update(&self, boat: &BoatRegistration) -> Result<(), DomainError> {
        let seats = serde_json::to_value(&boat.seats)
            .map_err(|e| DomainError::store(format!("serializing seats: {e}")))?;
        let club_list = serde_json::to_value(&boat.club_list)
            .map_err(|e| DomainError::store(format!("serializing club list: {e}")))?;
        sqlx::query(
            r#"
            UPDATE boat_registrations
            SET race_id = $2, seats = $3, is_rental = $4, registration_status = $5,
                club_display = $6, club_list = $7, is_multi_club = $8, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(boat.id)
        .bind(boat.race_id)
        .bind(seats)
        .bind(boat.is_rental)
        .bind(boat.registration_status.to_string())
        .bind(&boat.club_display)
        .bind(club_list)
        .bind(boat.is_multi_club)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("updating boat registration", e))?;
        Ok(())
    }

    /// Set only the lifecycle status. Used by the admin payment routes.
    pub async fn set_status(&self, id: Uuid, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE boat_registrations
            SET registration_status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boat_registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
