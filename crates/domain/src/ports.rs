//! Collaborator ports consumed by the rules engine.
//!
//! The engine never queries storage directly; configuration, grant, and
//! audit access go through these traits, implemented by the persistence
//! crate. Cancellation and timeout behavior is inherited from the
//! implementations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::models::audit_log::AuditLogEntry;
use crate::models::temporary_access::TemporaryAccessGrant;

/// Configuration domains stored as JSON documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigDomain {
    System,
    Pricing,
    Permissions,
}

impl ConfigDomain {
    /// Storage key for the domain.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigDomain::System => "SYSTEM",
            ConfigDomain::Pricing => "PRICING",
            ConfigDomain::Permissions => "PERMISSIONS",
        }
    }
}

impl std::fmt::Display for ConfigDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Store for configuration documents, one per domain.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the document for a domain, if one has been written.
    async fn get(&self, domain: ConfigDomain) -> Result<Option<serde_json::Value>, DomainError>;

    /// Replace the document for a domain, recording the acting admin.
    async fn put(
        &self,
        domain: ConfigDomain,
        value: serde_json::Value,
        actor: Uuid,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Store for temporary access grants, one record per user.
#[async_trait]
pub trait GrantStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> Result<Option<TemporaryAccessGrant>, DomainError>;

    /// Overwrite the user's grant record. Used both for issuing grants and
    /// for the validator's lazy-expiry rewrite.
    async fn put(&self, grant: TemporaryAccessGrant) -> Result<(), DomainError>;
}

/// Append-only audit sink. Call sites treat appends as fire-and-forget:
/// a failed write is logged and never alters a permission decision.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, entry: AuditLogEntry) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_domain_keys() {
        assert_eq!(ConfigDomain::System.key(), "SYSTEM");
        assert_eq!(ConfigDomain::Pricing.key(), "PRICING");
        assert_eq!(ConfigDomain::Permissions.key(), "PERMISSIONS");
        assert_eq!(ConfigDomain::Permissions.to_string(), "PERMISSIONS");
    }
}
