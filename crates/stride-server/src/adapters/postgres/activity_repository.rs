//! PostgreSQL implementation of ActivityRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use stride::{Activity, ActivityRepository, DomainError, LifestyleCategory};

use super::map_db_error;

/// PostgreSQL implementation of ActivityRepository
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
pub(super) struct ActivityRow {
    id: i32,
    name: String,
    base_time: Option<i32>,
    base_xp: Option<i32>,
    activity_type: Option<String>,
    description: Option<String>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        let activity_type = row.activity_type.as_deref().and_then(|t| match t.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(activity_id = row.id, "Ignoring activity type: {}", e);
                None
            }
        });

        Self {
            id: row.id,
            name: row.name,
            base_time: row.base_time,
            base_xp: row.base_xp,
            activity_type,
            description: row.description,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LifestyleRow {
    id: i32,
    name: String,
}

impl From<LifestyleRow> for LifestyleCategory {
    fn from(row: LifestyleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    async fn find_activity(&self, id: i32) -> Result<Option<Activity>, DomainError> {
        let row = sqlx::query_as::<_, ActivityRow>("SELECT * FROM activities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, DomainError> {
        let rows = sqlx::query_as::<_, ActivityRow>("SELECT * FROM activities ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_lifestyles(&self, lifestyle_ids: &[i32]) -> Result<Vec<Activity>, DomainError> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT DISTINCT a.*
            FROM activities a
            JOIN activity_styles s ON s.activity_id = a.id
            WHERE s.lifestyle_id = ANY($1)
            ORDER BY a.id
            "#,
        )
        .bind(lifestyle_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_lifestyles(&self) -> Result<Vec<LifestyleCategory>, DomainError> {
        let rows =
            sqlx::query_as::<_, LifestyleRow>("SELECT * FROM lifestyle_categories ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_user_lifestyles(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<LifestyleCategory>, DomainError> {
        let rows = sqlx::query_as::<_, LifestyleRow>(
            r#"
            SELECT l.id, l.name
            FROM lifestyle_categories l
            JOIN user_lifestyles ul ON ul.lifestyle_id = l.id
            WHERE ul.user_id = $1
            ORDER BY l.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn add_user_lifestyles(
        &self,
        user_id: Uuid,
        lifestyle_ids: &[i32],
    ) -> Result<Vec<LifestyleCategory>, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_lifestyles (user_id, lifestyle_id)
            SELECT $1, UNNEST($2::INTEGER[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(lifestyle_ids)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.list_user_lifestyles(user_id).await
    }

    async fn delete_user_lifestyles(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM user_lifestyles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
