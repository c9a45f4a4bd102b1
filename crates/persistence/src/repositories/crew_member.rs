//! Crew member repository.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CrewMemberEntity;

const COLUMNS: &str = "id, team_id, first_name, last_name, date_of_birth, gender, \
     club_affiliation, assigned_boat_id, created_at, updated_at";

/// Repository for crew member rows.
#[derive(Clone)]
pub struct CrewMemberRepository {
    pool: PgPool,
}

impl CrewMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        team_id: Uuid,
        first_name: &str,
        last_name: &str,
        date_of_birth: NaiveDate,
        gender: &str,
        club_affiliation: &str,
    ) -> Result<CrewMemberEntity, sqlx::Error> {
        sqlx::query_as::<_, CrewMemberEntity>(&format!(
            r#"
            INSERT INTO crew_members (team_id, first_name, last_name, date_of_birth, gender, club_affiliation)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(team_id)
        .bind(first_name)
        .bind(last_name)
        .bind(date_of_birth)
        .bind(gender)
        .bind(club_affiliation)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CrewMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, CrewMemberEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM crew_members
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<CrewMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, CrewMemberEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM crew_members
            WHERE team_id = $1
            ORDER BY last_name, first_name
            "#,
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Fetch several members at once, for crew classification and pricing.
    pub async fn list_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CrewMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, CrewMemberEntity>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM crew_members
            WHERE id = ANY($1)
            "#,
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        date_of_birth: NaiveDate,
        gender: &str,
        club_affiliation: &str,
    ) -> Result<Option<CrewMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, CrewMemberEntity>(&format!(
            r#"
            UPDATE crew_members
            SET first_name = $2, last_name = $3, date_of_birth = $4, gender = $5,
                club_affiliation = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(date_of_birth)
        .bind(gender)
        .bind(club_affiliation)
        .fetch_optional(&self.pool)
        .await
    }

    /// Point the member at a boat, or clear the assignment with `None`.
    pub async fn set_assignment(
        &self,
        id: Uuid,
        boat_id: Option<Uuid>,
    ) -> Result<Option<CrewMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, CrewMemberEntity>(&format!(
            r#"
            UPDATE crew_members
            SET assigned_boat_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(boat_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Clear the assignment for every member of a boat. Used on boat
    /// deletion and when a seat is vacated wholesale.
    pub async fn clear_assignments_for_boat(&self, boat_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE crew_members
            SET assigned_boat_id = NULL, updated_at = NOW()
            WHERE assigned_boat_id = $1
            "#,
        )
        .bind(boat_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM crew_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
