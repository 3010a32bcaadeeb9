//! PostgreSQL implementation of ProgressRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use stride::{
    CommitResult, CompletionOutcome, CompletionRecord, DomainError, ProgressRepository,
    ProgressionState, StoredProgress, UserProfile,
};

use super::map_db_error;

/// PostgreSQL implementation of ProgressRepository
pub struct PgProgressRepository {
    pool: PgPool,
}

impl PgProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProgressRow {
    user_id: Uuid,
    version: i64,
    level: i64,
    xp: i64,
    day_streak: i64,
    stress_level: Option<i64>,
    last_success_at: Option<DateTime<Utc>>,
    has_succeeded_today: bool,
    updated_at: DateTime<Utc>,
}

impl From<ProgressRow> for StoredProgress {
    fn from(row: ProgressRow) -> Self {
        Self {
            user_id: row.user_id,
            version: row.version,
            state: ProgressionState {
                level: row.level,
                xp: row.xp,
                day_streak: row.day_streak,
                stress_level: row.stress_level,
                last_success_at: row.last_success_at,
                has_succeeded_today: row.has_succeeded_today,
            },
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CompletionRow {
    id: Uuid,
    user_id: Uuid,
    activity_id: i32,
    idempotency_key: Option<Uuid>,
    xp_gained: i64,
    levels_gained: i64,
    streak_changed: bool,
    stress_decremented: i64,
    level: i64,
    xp: i64,
    day_streak: i64,
    occurred_at: DateTime<Utc>,
}

impl From<CompletionRow> for CompletionRecord {
    fn from(row: CompletionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            activity_id: row.activity_id,
            idempotency_key: row.idempotency_key,
            outcome: CompletionOutcome {
                xp_gained: row.xp_gained,
                levels_gained: row.levels_gained,
                streak_changed: row.streak_changed,
                stress_decremented: row.stress_decremented,
                level: row.level,
                xp: row.xp,
                day_streak: row.day_streak,
            },
            occurred_at: row.occurred_at,
        }
    }
}

const UPDATE_PROGRESS: &str = r#"
    UPDATE user_progress
    SET level = $3,
        xp = $4,
        day_streak = $5,
        stress_level = $6,
        last_success_at = $7,
        has_succeeded_today = $8,
        version = version + 1,
        updated_at = NOW()
    WHERE user_id = $1 AND version = $2
    RETURNING *
"#;

/// Version-checked state update; `None` when the stored version moved on
async fn update_progress(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    expected_version: i64,
    state: &ProgressionState,
) -> Result<Option<ProgressRow>, sqlx::Error> {
    sqlx::query_as::<_, ProgressRow>(UPDATE_PROGRESS)
        .bind(user_id)
        .bind(expected_version)
        .bind(state.level)
        .bind(state.xp)
        .bind(state.day_streak)
        .bind(state.stress_level)
        .bind(state.last_success_at)
        .bind(state.has_succeeded_today)
        .fetch_optional(&mut **tx)
        .await
}

#[async_trait]
impl ProgressRepository for PgProgressRepository {
    async fn create_user(&self, user: &UserProfile) -> Result<StoredProgress, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("INSERT INTO users (id, username, created_at) VALUES ($1, $2, $3)")
            .bind(user.id)
            .bind(&user.username)
            .bind(user.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| match map_db_error(e) {
                DomainError::Conflict(_) => {
                    DomainError::Conflict(format!("Username '{}' is already taken", user.username))
                }
                other => other,
            })?;

        let defaults = ProgressionState::default();
        let row = sqlx::query_as::<_, ProgressRow>(
            r#"
            INSERT INTO user_progress
                (user_id, version, level, xp, day_streak, stress_level, last_success_at, has_succeeded_today)
            VALUES ($1, 0, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(defaults.level)
        .bind(defaults.xp)
        .bind(defaults.day_streak)
        .bind(defaults.stress_level)
        .bind(defaults.last_success_at)
        .bind(defaults.has_succeeded_today)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_progress(&self, user_id: Uuid) -> Result<Option<StoredProgress>, DomainError> {
        let row =
            sqlx::query_as::<_, ProgressRow>("SELECT * FROM user_progress WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn save_progress(
        &self,
        user_id: Uuid,
        expected_version: i64,
        state: &ProgressionState,
    ) -> Result<Option<StoredProgress>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let row = update_progress(&mut tx, user_id, expected_version, state)
            .await
            .map_err(map_db_error)?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn commit_completion(
        &self,
        expected_version: i64,
        state: &ProgressionState,
        record: &CompletionRecord,
    ) -> Result<CommitResult, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let Some(row) = update_progress(&mut tx, record.user_id, expected_version, state)
            .await
            .map_err(map_db_error)?
        else {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(CommitResult::VersionConflict);
        };

        let inserted = sqlx::query(
            r#"
            INSERT INTO completions
                (id, user_id, activity_id, idempotency_key, xp_gained, levels_gained,
                 streak_changed, stress_decremented, level, xp, day_streak, occurred_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (user_id, idempotency_key) DO NOTHING
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.activity_id)
        .bind(record.idempotency_key)
        .bind(record.outcome.xp_gained)
        .bind(record.outcome.levels_gained)
        .bind(record.outcome.streak_changed)
        .bind(record.outcome.stress_decremented)
        .bind(record.outcome.level)
        .bind(record.outcome.xp)
        .bind(record.outcome.day_streak)
        .bind(record.occurred_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if inserted.rows_affected() == 0 {
            // Same key committed by a concurrent request
            tx.rollback().await.map_err(map_db_error)?;
            let previous = match record.idempotency_key {
                Some(key) => self.find_completion_by_key(record.user_id, key).await?,
                None => None,
            };
            return Ok(match previous {
                Some(previous) => CommitResult::Duplicate(previous),
                None => CommitResult::VersionConflict,
            });
        }

        sqlx::query(
            r#"
            UPDATE plan_activities pa
            SET success_count = pa.success_count + 1
            FROM activity_plans p
            WHERE pa.plan_id = p.id AND p.user_id = $1 AND pa.activity_id = $2
            "#,
        )
        .bind(record.user_id)
        .bind(record.activity_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(CommitResult::Committed(row.into()))
    }

    async fn find_completion_by_key(
        &self,
        user_id: Uuid,
        key: Uuid,
    ) -> Result<Option<CompletionRecord>, DomainError> {
        let row = sqlx::query_as::<_, CompletionRow>(
            "SELECT * FROM completions WHERE user_id = $1 AND idempotency_key = $2",
        )
        .bind(user_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn list_completions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<CompletionRecord>, DomainError> {
        let rows = sqlx::query_as::<_, CompletionRow>(
            r#"
            SELECT * FROM completions
            WHERE user_id = $1
            ORDER BY occurred_at DESC, id
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
