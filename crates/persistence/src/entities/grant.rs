//! Temporary access grant entity.

use chrono::{DateTime, Utc};
use domain::models::{GrantStatus, TemporaryAccessGrant};
use domain::DomainError;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for a temporary access grant. One row per user; a new
/// grant overwrites the previous one.
#[derive(Debug, Clone, FromRow)]
pub struct GrantEntity {
    pub user_id: Uuid,
    pub granted_by: Uuid,
    pub granted_at: DateTime<Utc>,
    /// Stored as text: the validator treats unparseable values as
    /// inactive instead of failing the row mapping.
    pub expires_at: String,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

impl GrantEntity {
    pub fn into_domain(self) -> Result<TemporaryAccessGrant, DomainError> {
        let status = match self.status.as_str() {
            "active" => GrantStatus::Active,
            "expired" => GrantStatus::Expired,
            "revoked" => GrantStatus::Revoked,
            other => {
                return Err(DomainError::store(format!(
                    "unknown grant status {other:?} for user {}",
                    self.user_id
                )))
            }
        };
        Ok(TemporaryAccessGrant {
            user_id: self.user_id,
            granted_by: self.granted_by,
            granted_at: self.granted_at,
            expires_at: self.expires_at,
            status,
        })
    }
}
