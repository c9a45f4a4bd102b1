//! Boat registration entity.

use chrono::{DateTime, Utc};
use domain::models::{BoatRegistration, HullType, RegistrationStatus, Seat};
use domain::DomainError;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for a boat registration row. Seats and the club list
/// are stored as JSONB.
#[derive(Debug, Clone, FromRow)]
pub struct BoatRegistrationEntity {
    pub id: Uuid,
    pub team_id: Uuid,
    pub event_type: String,
    pub hull_type: String,
    pub race_id: Option<Uuid>,
    pub seats: serde_json::Value,
    pub is_rental: bool,
    pub registration_status: String,
    pub club_display: String,
    pub club_list: serde_json::Value,
    pub is_multi_club: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) fn hull_type_from_str(value: &str) -> Option<HullType> {
    match value {
        "skiff" => Some(HullType::Skiff),
        "coxless_four" => Some(HullType::CoxlessFour),
        "coxed_four" => Some(HullType::CoxedFour),
        "eight" => Some(HullType::Eight),
        _ => None,
    }
}

pub(crate) fn status_from_str(value: &str) -> Option<RegistrationStatus> {
    match value {
        "incomplete" => Some(RegistrationStatus::Incomplete),
        "complete" => Some(RegistrationStatus::Complete),
        "free" => Some(RegistrationStatus::Free),
        "paid" => Some(RegistrationStatus::Paid),
        "forfeit" => Some(RegistrationStatus::Forfeit),
        _ => None,
    }
}

impl BoatRegistrationEntity {
    pub fn into_domain(self) -> Result<BoatRegistration, DomainError> {
        let hull_type = hull_type_from_str(&self.hull_type).ok_or_else(|| {
            DomainError::store(format!(
                "unknown hull type {:?} for boat {}",
                self.hull_type, self.id
            ))
        })?;
        let registration_status =
            status_from_str(&self.registration_status).ok_or_else(|| {
                DomainError::store(format!(
                    "unknown registration status {:?} for boat {}",
                    self.registration_status, self.id
                ))
            })?;
        let seats: Vec<Seat> = serde_json::from_value(self.seats)
            .map_err(|e| DomainError::store(format!("invalid seats for boat {}: {e}", self.id)))?;
        let club_list: Vec<String> = serde_json::from_value(self.club_list).map_err(|e| {
            DomainError::store(format!("invalid club list for boat {}: {e}", self.id))
        })?;
        Ok(BoatRegistration {
            id: self.id,
            team_id: self.team_id,
            event_type: self.event_type,
            hull_type,
            race_id: self.race_id,
            seats,
            is_rental: self.is_rental,
            registration_status,
            club_display: self.club_display,
            club_list,
            is_multi_club: self.is_multi_club,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> BoatRegistrationEntity {
        let boat = BoatRegistration::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "regatta".to_string(),
            HullType::CoxedFour,
        );
        BoatRegistrationEntity {
            id: boat.id,
            team_id: boat.team_id,
            event_type: boat.event_type.clone(),
            hull_type: "coxed_four".to_string(),
            race_id: None,
            seats: serde_json::to_value(&boat.seats).unwrap(),
            is_rental: false,
            registration_status: "incomplete".to_string(),
            club_display: String::new(),
            club_list: serde_json::json!([]),
            is_multi_club: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_into_domain_round_trip() {
        let boat = entity().into_domain().unwrap();
        assert_eq!(boat.hull_type, HullType::CoxedFour);
        assert_eq!(boat.registration_status, RegistrationStatus::Incomplete);
        assert_eq!(boat.seats.len(), 5);
        assert!(boat.club_list.is_empty());
    }

    #[test]
    fn test_into_domain_rejects_unknown_hull() {
        let mut bad = entity();
        bad.hull_type = "canoe".to_string();
        assert!(bad.into_domain().is_err());
    }

    #[test]
    fn test_into_domain_rejects_malformed_seats() {
        let mut bad = entity();
        bad.seats = serde_json::json!({ "not": "a list" });
        assert!(bad.into_domain().is_err());
    }
}
