//! Configuration document entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for a configuration document. One row per domain
/// (SYSTEM, PRICING, PERMISSIONS).
#[derive(Debug, Clone, FromRow)]
pub struct ConfigDocumentEntity {
    /// Configuration domain key.
    pub domain_key: String,

    /// The JSON document for the domain.
    pub document: serde_json::Value,

    /// Admin who last replaced the document.
    pub updated_by: Uuid,

    /// Timestamp of the last replacement.
    pub updated_at: DateTime<Utc>,
}
