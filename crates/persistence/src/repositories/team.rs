//! Team repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TeamEntity;

/// Repository for team accounts.
#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a team by its API key. Used by the auth middleware.
    pub async fn find_by_api_key(&self, api_key: &str) -> Result<Option<TeamEntity>, sqlx::Error> {
        sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, name, api_key, is_admin, home_club, created_at
            FROM teams
            WHERE api_key = $1
            "#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamEntity>, sqlx::Error> {
        sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, name, api_key, is_admin, home_club, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
