//! Temporary access grant repository.

use async_trait::async_trait;
use domain::models::TemporaryAccessGrant;
use domain::ports::GrantStore;
use domain::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GrantEntity;
use crate::repositories::store_error;

/// Repository for temporary access grants. One row per user; issuing a
/// new grant or the validator's lazy-expiry rewrite replaces the row.
#[derive(Clone)]
pub struct GrantRepository {
    pool: PgPool,
}

impl GrantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, user_id: Uuid) -> Result<Option<GrantEntity>, sqlx::Error> {
        sqlx::query_as::<_, GrantEntity>(
            r#"
            SELECT user_id, granted_by, granted_at, expires_at, status, updated_at
            FROM temporary_access_grants
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn upsert(&self, grant: &TemporaryAccessGrant) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO temporary_access_grants (user_id, granted_by, granted_at, expires_at, status, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET granted_by = $2, granted_at = $3, expires_at = $4, status = $5, updated_at = NOW()
            "#,
        )
        .bind(grant.user_id)
        .bind(grant.granted_by)
        .bind(grant.granted_at)
        .bind(&grant.expires_at)
        .bind(grant.status.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl GrantStore for GrantRepository {
    async fn get(&self, user_id: Uuid) -> Result<Option<TemporaryAccessGrant>, DomainError> {
        let entity = self
            .find(user_id)
            .await
            .map_err(|e| store_error("fetching access grant", e))?;
        entity.map(GrantEntity::into_domain).transpose()
    }

    async fn put(&self, grant: TemporaryAccessGrant) -> Result<(), DomainError> {
        self.upsert(&grant)
            .await
            .map_err(|e| store_error("writing access grant", e))
    }
}
