//! Cached access to the stored configuration documents.
//!
//! Read-through caches with short bounded TTLs: concurrent requests may
//! observe a stale-but-recently-valid snapshot, which is acceptable
//! because configuration changes are rare administrative actions. The
//! caches are explicit objects owned by this service; nothing is global.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::DomainError;
use crate::models::audit_log::AuditLogEntry;
use crate::models::permission::{default_permissions, PermissionMatrix};
use crate::models::pricing::PricingConfig;
use crate::models::system_config::SystemConfig;
use crate::ports::{AuditSink, ConfigDomain, ConfigStore};
use shared::cache::TtlCache;

/// TTL for system and pricing config snapshots.
const CONFIG_TTL_SECS: i64 = 300;

/// TTL for the permission matrix; kept short so rule changes take effect
/// quickly.
const MATRIX_TTL_SECS: i64 = 15;

/// Read-through cached configuration access shared by the engine and the
/// request handlers.
pub struct ConfigService {
    store: Arc<dyn ConfigStore>,
    audit: Arc<dyn AuditSink>,
    system_cache: TtlCache<SystemConfig>,
    pricing_cache: TtlCache<PricingConfig>,
    matrix_cache: TtlCache<PermissionMatrix>,
}

impl ConfigService {
    pub fn new(store: Arc<dyn ConfigStore>, audit: Arc<dyn AuditSink>) -> Self {
        Self::with_ttls(store, audit, CONFIG_TTL_SECS, MATRIX_TTL_SECS)
    }

    pub fn with_ttls(
        store: Arc<dyn ConfigStore>,
        audit: Arc<dyn AuditSink>,
        config_ttl_secs: i64,
        matrix_ttl_secs: i64,
    ) -> Self {
        Self {
            store,
            audit,
            system_cache: TtlCache::new(config_ttl_secs),
            pricing_cache: TtlCache::new(config_ttl_secs),
            matrix_cache: TtlCache::new(matrix_ttl_secs),
        }
    }

    /// Validated system configuration. A missing document is a
    /// configuration error: callers fail closed, never permissive.
    pub async fn system_config(&self, now: DateTime<Utc>) -> Result<SystemConfig, DomainError> {
        if let Some(config) = self.system_cache.get(now) {
            return Ok(config);
        }
        let value = self
            .store
            .get(ConfigDomain::System)
            .await?
            .ok_or_else(|| DomainError::configuration("system configuration is not set"))?;
        let config = SystemConfig::from_value(&value)?;
        self.system_cache.put(config.clone(), now);
        Ok(config)
    }

    /// Validated pricing configuration. Missing or malformed pricing
    /// never silently defaults to "free".
    pub async fn pricing_config(&self, now: DateTime<Utc>) -> Result<PricingConfig, DomainError> {
        if let Some(config) = self.pricing_cache.get(now) {
            return Ok(config);
        }
        let value = self
            .store
            .get(ConfigDomain::Pricing)
            .await?
            .ok_or_else(|| DomainError::configuration("pricing configuration is not set"))?;
        let config = PricingConfig::from_value(&value)?;
        self.pricing_cache.put(config.clone(), now);
        Ok(config)
    }

    /// Permission matrix. An absent document falls back to the
    /// hard-coded default table; a malformed one is an error the caller
    /// decides about explicitly.
    pub async fn permission_matrix(
        &self,
        now: DateTime<Utc>,
    ) -> Result<PermissionMatrix, DomainError> {
        if let Some(matrix) = self.matrix_cache.get(now) {
            return Ok(matrix);
        }
        let matrix = match self.store.get(ConfigDomain::Permissions).await? {
            Some(value) => PermissionMatrix::from_value(&value)?,
            None => default_permissions(),
        };
        self.matrix_cache.put(matrix.clone(), now);
        Ok(matrix)
    }

    /// Replace a configuration document. Validates before writing,
    /// invalidates the cache, and appends a config-change audit entry.
    pub async fn update(
        &self,
        domain: ConfigDomain,
        value: serde_json::Value,
        actor: Uuid,
        now: DateTime<Utc>,
    ) -> Result<serde_json::Value, DomainError> {
        match domain {
            ConfigDomain::System => {
                SystemConfig::from_value(&value)?;
            }
            ConfigDomain::Pricing => {
                PricingConfig::from_value(&value)?;
            }
            ConfigDomain::Permissions => {
                PermissionMatrix::from_value(&value)?;
            }
        }

        let stored = self.store.put(domain, value, actor).await?;

        match domain {
            ConfigDomain::System => self.system_cache.invalidate(),
            ConfigDomain::Pricing => self.pricing_cache.invalidate(),
            ConfigDomain::Permissions => self.matrix_cache.invalidate(),
        }

        let entry = AuditLogEntry::config_change(
            actor,
            domain.key(),
            format!("{domain} configuration replaced"),
            now,
        );
        if let Err(err) = self.audit.append(entry).await {
            tracing::warn!(%domain, error = %err, "failed to append config-change audit entry");
        }

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryConfigStore {
        system: Mutex<Option<serde_json::Value>>,
        pricing: Mutex<Option<serde_json::Value>>,
        permissions: Mutex<Option<serde_json::Value>>,
        gets: Mutex<u32>,
    }

    impl MemoryConfigStore {
        fn slot(&self, domain: ConfigDomain) -> &Mutex<Option<serde_json::Value>> {
            match domain {
                ConfigDomain::System => &self.system,
                ConfigDomain::Pricing => &self.pricing,
                ConfigDomain::Permissions => &self.permissions,
            }
        }
    }

    #[async_trait]
    impl ConfigStore for MemoryConfigStore {
        async fn get(
            &self,
            domain: ConfigDomain,
        ) -> Result<Option<serde_json::Value>, DomainError> {
            *self.gets.lock().unwrap() += 1;
            Ok(self.slot(domain).lock().unwrap().clone())
        }

        async fn put(
            &self,
            domain: ConfigDomain,
            value: serde_json::Value,
            _actor: Uuid,
        ) -> Result<serde_json::Value, DomainError> {
            *self.slot(domain).lock().unwrap() = Some(value.clone());
            Ok(value)
        }
    }

    #[derive(Default)]
    struct MemoryAuditSink {
        entries: Mutex<Vec<AuditLogEntry>>,
    }

    #[async_trait]
    impl AuditSink for MemoryAuditSink {
        async fn append(&self, entry: AuditLogEntry) -> Result<(), DomainError> {
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }
    }

    fn system_value() -> serde_json::Value {
        serde_json::json!({
            "registration_start": "2025-03-19",
            "registration_end": "2025-04-19",
            "payment_deadline": "2025-05-01",
            "event_date": "2025-06-14",
            "temp_access_default_hours": 24
        })
    }

    #[tokio::test]
    async fn test_missing_system_config_is_error() {
        let service = ConfigService::new(
            Arc::new(MemoryConfigStore::default()),
            Arc::new(MemoryAuditSink::default()),
        );
        let err = service.system_config(Utc::now()).await.unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_system_config_cached_within_ttl() {
        let store = Arc::new(MemoryConfigStore::default());
        *store.system.lock().unwrap() = Some(system_value());
        let service = ConfigService::new(store.clone(), Arc::new(MemoryAuditSink::default()));

        let now = Utc::now();
        service.system_config(now).await.unwrap();
        service.system_config(now).await.unwrap();
        assert_eq!(*store.gets.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_absent_matrix_falls_back_to_defaults() {
        let service = ConfigService::new(
            Arc::new(MemoryConfigStore::default()),
            Arc::new(MemoryAuditSink::default()),
        );
        let matrix = service.permission_matrix(Utc::now()).await.unwrap();
        assert!(matrix.rule_for("boat.create").is_some());
    }

    #[tokio::test]
    async fn test_malformed_matrix_is_error_not_permissive() {
        let store = Arc::new(MemoryConfigStore::default());
        *store.permissions.lock().unwrap() =
            Some(serde_json::json!({ "boat.create": { "during_registration": true } }));
        let service = ConfigService::new(store, Arc::new(MemoryAuditSink::default()));
        assert!(service.permission_matrix(Utc::now()).await.is_err());
    }

    #[tokio::test]
    async fn test_update_validates_and_audits() {
        let store = Arc::new(MemoryConfigStore::default());
        let audit = Arc::new(MemoryAuditSink::default());
        let service = ConfigService::new(store.clone(), audit.clone());
        let admin = Uuid::new_v4();

        // Invalid document rejected before any write.
        let bad = serde_json::json!({ "registration_start": "soon" });
        assert!(service
            .update(ConfigDomain::System, bad, admin, Utc::now())
            .await
            .is_err());
        assert!(store.system.lock().unwrap().is_none());
        assert!(audit.entries.lock().unwrap().is_empty());

        service
            .update(ConfigDomain::System, system_value(), admin, Utc::now())
            .await
            .unwrap();
        let entries = audit.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "config.system");
    }

    #[tokio::test]
    async fn test_update_invalidates_cache() {
        let store = Arc::new(MemoryConfigStore::default());
        *store.system.lock().unwrap() = Some(system_value());
        let service = ConfigService::new(store.clone(), Arc::new(MemoryAuditSink::default()));

        let now = Utc::now();
        let before = service.system_config(now).await.unwrap();
        assert_eq!(before.temp_access_default_hours, 24);

        let mut updated = system_value();
        updated["temp_access_default_hours"] = serde_json::json!(48);
        service
            .update(ConfigDomain::System, updated, Uuid::new_v4(), now)
            .await
            .unwrap();

        let after = service.system_config(now).await.unwrap();
        assert_eq!(after.temp_access_default_hours, 48);
    }
}
