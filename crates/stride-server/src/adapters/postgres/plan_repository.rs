//! PostgreSQL implementation of PlanRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use stride::{ActivityPlan, DomainError, NewPlannedActivity, PlanRepository, PlannedActivity};

use super::activity_repository::ActivityRow;
use super::map_db_error;

/// PostgreSQL implementation of PlanRepository
pub struct PgPlanRepository {
    pool: PgPool,
}

impl PgPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<PlanRow> for ActivityPlan {
    fn from(row: PlanRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PlannedRow {
    plan_id: Uuid,
    success_count: i32,
    is_chosen: bool,
    #[sqlx(flatten)]
    activity: ActivityRow,
}

impl From<PlannedRow> for PlannedActivity {
    fn from(row: PlannedRow) -> Self {
        Self {
            plan_id: row.plan_id,
            activity: row.activity.into(),
            success_count: row.success_count,
            is_chosen: row.is_chosen,
        }
    }
}

const PLANNED_SELECT: &str = r#"
    SELECT pa.plan_id, pa.success_count, pa.is_chosen,
           a.id, a.name, a.base_time, a.base_xp, a.activity_type, a.description
    FROM plan_activities pa
    JOIN activities a ON a.id = pa.activity_id
"#;

#[async_trait]
impl PlanRepository for PgPlanRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<ActivityPlan>, DomainError> {
        let row = sqlx::query_as::<_, PlanRow>("SELECT * FROM activity_plans WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, plan: &ActivityPlan) -> Result<ActivityPlan, DomainError> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            INSERT INTO activity_plans (id, user_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(plan.id)
        .bind(plan.user_id)
        .bind(plan.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn add_activities(
        &self,
        plan_id: Uuid,
        items: &[NewPlannedActivity],
    ) -> Result<Vec<PlannedActivity>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO plan_activities (plan_id, activity_id, success_count, is_chosen)
                VALUES ($1, $2, 0, $3)
                "#,
            )
            .bind(plan_id)
            .bind(item.activity_id)
            .bind(item.is_chosen)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        let ids: Vec<i32> = items.iter().map(|i| i.activity_id).collect();
        let rows = sqlx::query_as::<_, PlannedRow>(&format!(
            "{PLANNED_SELECT} WHERE pa.plan_id = $1 AND pa.activity_id = ANY($2) ORDER BY a.id"
        ))
        .bind(plan_id)
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_chosen(
        &self,
        plan_id: Uuid,
        activity_id: i32,
        is_chosen: bool,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE plan_activities SET is_chosen = $3 WHERE plan_id = $1 AND activity_id = $2",
        )
        .bind(plan_id)
        .bind(activity_id)
        .bind(is_chosen)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_activities(&self, plan_id: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM plan_activities WHERE plan_id = $1")
            .bind(plan_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    async fn list_planned(
        &self,
        plan_id: Uuid,
        chosen_only: bool,
    ) -> Result<Vec<PlannedActivity>, DomainError> {
        let rows = sqlx::query_as::<_, PlannedRow>(&format!(
            "{PLANNED_SELECT} WHERE pa.plan_id = $1 AND ($2 = FALSE OR pa.is_chosen) ORDER BY a.id"
        ))
        .bind(plan_id)
        .bind(chosen_only)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
