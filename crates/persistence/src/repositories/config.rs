//! Configuration document repository.

use async_trait::async_trait;
use domain::ports::{ConfigDomain, ConfigStore};
use domain::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ConfigDocumentEntity;
use crate::repositories::store_error;

/// Repository for configuration documents. One row per domain, replaced
/// wholesale by admin writes.
#[derive(Clone)]
pub struct ConfigRepository {
    pool: PgPool,
}

impl ConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the raw entity for a domain key.
    pub async fn find(&self, domain_key: &str) -> Result<Option<ConfigDocumentEntity>, sqlx::Error> {
        sqlx::query_as::<_, ConfigDocumentEntity>(
            r#"
            SELECT domain_key, document, updated_by, updated_at
            FROM config_documents
            WHERE domain_key = $1
            "#,
        )
        .bind(domain_key)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert or replace the document for a domain key.
    pub async fn upsert(
        &self,
        domain_key: &str,
        document: serde_json::Value,
        updated_by: Uuid,
    ) -> Result<ConfigDocumentEntity, sqlx::Error> {
        sqlx::query_as::<_, ConfigDocumentEntity>(
            r#"
            INSERT INTO config_documents (domain_key, document, updated_by, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (domain_key) DO UPDATE
            SET document = $2, updated_by = $3, updated_at = NOW()
            RETURNING domain_key, document, updated_by, updated_at
            "#,
        )
        .bind(domain_key)
        .bind(document)
        .bind(updated_by)
        .fetch_one(&self.pool)
        .await
    }
}

#[async_trait]
impl ConfigStore for ConfigRepository {
    async fn get(&self, domain: ConfigDomain) -> Result<Option<serde_json::Value>, DomainError> {
        let entity = self
            .find(domain.key())
            .await
            .map_err(|e| store_error("fetching config document", e))?;
        Ok(entity.map(|e| e.document))
    }

    async fn put(
        &self,
        domain: ConfigDomain,
        value: serde_json::Value,
        actor: Uuid,
    ) -> Result<serde_json::Value, DomainError> {
        let entity = self
            .upsert(domain.key(), value, actor)
            .await
            .map_err(|e| store_error("replacing config document", e))?;
        Ok(entity.document)
    }
}
