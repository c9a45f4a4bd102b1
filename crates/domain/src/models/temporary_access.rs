//! Temporary access grant records.
//!
//! An admin can grant a team user a time-boxed override of the phase
//! rules. Exactly one grant record exists per user; issuing a new grant
//! overwrites the previous one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a grant. `active` transitions to `expired` lazily
/// on read, or to `revoked` explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    Active,
    Expired,
    Revoked,
}

impl std::fmt::Display for GrantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrantStatus::Active => write!(f, "active"),
            GrantStatus::Expired => write!(f, "expired"),
            GrantStatus::Revoked => write!(f, "revoked"),
        }
    }
}

/// A time-boxed administrative override grant.
///
/// `expires_at` is kept as a string: the validator must treat an
/// unparseable value as "no override" rather than rejecting the record
/// at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TemporaryAccessGrant {
    pub user_id: Uuid,
    pub granted_by: Uuid,
    pub granted_at: DateTime<Utc>,
    /// Expiration instant, full timestamp or date-only.
    pub expires_at: String,
    pub status: GrantStatus,
}

impl TemporaryAccessGrant {
    /// Issue a fresh active grant expiring after the given number of hours.
    pub fn issue(user_id: Uuid, granted_by: Uuid, now: DateTime<Utc>, hours: u32) -> Self {
        let expires = now + chrono::Duration::hours(i64::from(hours));
        Self {
            user_id,
            granted_by,
            granted_at: now,
            expires_at: expires.to_rfc3339(),
            status: GrantStatus::Active,
        }
    }

    /// Copy of this grant marked expired. Idempotent.
    pub fn expired(&self) -> Self {
        Self {
            status: GrantStatus::Expired,
            ..self.clone()
        }
    }

    /// Copy of this grant marked revoked.
    pub fn revoked(&self) -> Self {
        Self {
            status: GrantStatus::Revoked,
            ..self.clone()
        }
    }
}
