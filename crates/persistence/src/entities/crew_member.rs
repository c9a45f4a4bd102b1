//! Crew member entity.

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{CrewMember, Gender};
use domain::DomainError;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for a crew member row.
#[derive(Debug, Clone, FromRow)]
pub struct CrewMemberEntity {
    pub id: Uuid,
    pub team_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    /// Gender code, "m" or "f".
    pub gender: String,
    pub club_affiliation: String,
    pub assigned_boat_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CrewMemberEntity {
    pub fn into_domain(self) -> Result<CrewMember, DomainError> {
        let gender = match self.gender.as_str() {
            "m" => Gender::Male,
            "f" => Gender::Female,
            other => {
                return Err(DomainError::store(format!(
                    "unknown gender code {other:?} for crew member {}",
                    self.id
                )))
            }
        };
        Ok(CrewMember {
            id: self.id,
            team_id: self.team_id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender,
            club_affiliation: self.club_affiliation,
            assigned_boat_id: self.assigned_boat_id,
        })
    }
}
