//! Audit log repository.

use async_trait::async_trait;
use domain::models::AuditLogEntry;
use domain::ports::AuditSink;
use domain::DomainError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AuditLogEntity;
use crate::repositories::store_error;

/// Repository for the append-only audit log.
#[derive(Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, entry: &AuditLogEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (id, kind, actor, impersonated, action, phase, detail, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(entry.kind.to_string())
        .bind(entry.actor)
        .bind(entry.impersonated)
        .bind(&entry.action)
        .bind(entry.phase.map(|p| p.to_string()))
        .bind(&entry.detail)
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// List recent entries, newest first, optionally filtered by actor.
    pub async fn list(
        &self,
        actor: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<AuditLogEntity>, sqlx::Error> {
        match actor {
            Some(actor) => {
                sqlx::query_as::<_, AuditLogEntity>(
                    r#"
                    SELECT id, kind, actor, impersonated, action, phase, detail, timestamp
                    FROM audit_log
                    WHERE actor = $1
                    ORDER BY timestamp DESC
                    LIMIT $2
                    "#,
                )
                .bind(actor)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, AuditLogEntity>(
                    r#"
                    SELECT id, kind, actor, impersonated, action, phase, detail, timestamp
                    FROM audit_log
                    ORDER BY timestamp DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
    }
}

#[async_trait]
impl AuditSink for AuditLogRepository {
    async fn append(&self, entry: AuditLogEntry) -> Result<(), DomainError> {
        self.insert(&entry)
            .await
            .map_err(|e| store_error("appending audit entry", e))
    }
}
