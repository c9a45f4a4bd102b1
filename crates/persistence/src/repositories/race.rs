//! Race repository. Races are static reference data.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RaceEntity;

const COLUMNS: &str = "id, name, hull_type, age_category, gender_category, master_category";

#[derive(Clone)]
pub struct RaceRepository {
    pool: PgPool,
}

impl RaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<RaceEntity>, sqlx::Error> {
        sqlx::query_as::<_, RaceEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM races
            ORDER BY name
            "#,
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RaceEntity>, sqlx::Error> {
        sqlx::query_as::<_, RaceEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM races
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
