//! Crew member domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered gender of a crew member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "m"),
            Gender::Female => write!(f, "f"),
        }
    }
}

/// A rower or cox belonging to a team. A member is assigned to at most
/// one boat at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CrewMember {
    pub id: Uuid,
    /// Owning team.
    pub team_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub club_affiliation: String,
    /// Boat this member currently occupies a seat in, if any.
    pub assigned_boat_id: Option<Uuid>,
}

impl CrewMember {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_boat_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_serialization() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"m\"");
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"f\"");
        let g: Gender = serde_json::from_str("\"f\"").unwrap();
        assert_eq!(g, Gender::Female);
    }

    #[test]
    fn test_full_name_and_assignment() {
        let member = CrewMember {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            first_name: "Anna".to_string(),
            last_name: "Berg".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1998, 4, 2).unwrap(),
            gender: Gender::Female,
            club_affiliation: "RC Hansa".to_string(),
            assigned_boat_id: None,
        };
        assert_eq!(member.full_name(), "Anna Berg");
        assert!(!member.is_assigned());
    }
}
