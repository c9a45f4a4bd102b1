//! Team entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for a team account. Teams authenticate with an API key
/// and own crew members and boat registrations.
#[derive(Debug, Clone, FromRow)]
pub struct TeamEntity {
    /// Unique identifier.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// API key used for authentication.
    pub api_key: String,

    /// Whether the team has admin privileges.
    pub is_admin: bool,

    /// Default club affiliation used when a boat has no filled seats.
    pub home_club: String,

    /// Timestamp when the team was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_entity_creation() {
        let entity = TeamEntity {
            id: Uuid::new_v4(),
            name: "RC Hansa".to_string(),
            api_key: "team-key-1".to_string(),
            is_admin: false,
            home_club: "RC Hansa".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(entity.name, "RC Hansa");
        assert!(!entity.is_admin);
    }
}
