//! Progress DTOs - Progression state over the wire

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use stride::{CompletionRecord, StoredProgress, UserProfile, XP_PER_LEVEL};

use crate::application::CompletionReport;

// ============================================
// Request DTOs
// ============================================

/// Register user request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    pub username: String,
}

/// Complete activity request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteActivityRequest {
    pub activity_id: i32,
    /// Repeating a request with the same key returns the first outcome
    pub idempotency_key: Option<Uuid>,
}

/// Stress baseline request (1..=10, from the lifestyle classifier)
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStressRequest {
    pub stress_level: i64,
}

#[derive(Debug, Deserialize)]
pub struct CompletionHistoryQuery {
    pub limit: Option<i64>,
}

// ============================================
// Response DTOs
// ============================================

/// Progression state with its persistence version
#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressResponse {
    pub user_id: Uuid,
    pub level: i64,
    pub xp: i64,
    pub xp_for_next_level: i64,
    pub xp_to_next_level: i64,
    pub day_streak: i64,
    pub stress_level: Option<i64>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub has_succeeded_today: bool,
    pub version: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredProgress> for ProgressResponse {
    fn from(progress: StoredProgress) -> Self {
        Self {
            user_id: progress.user_id,
            level: progress.state.level,
            xp: progress.state.xp,
            xp_for_next_level: XP_PER_LEVEL,
            xp_to_next_level: progress.state.xp_to_next_level(),
            day_streak: progress.state.day_streak,
            stress_level: progress.state.stress_level,
            last_success_at: progress.state.last_success_at,
            has_succeeded_today: progress.state.has_succeeded_today,
            version: progress.version,
            updated_at: progress.updated_at,
        }
    }
}

/// User with progression state
#[derive(Debug, Serialize, ToSchema)]
pub struct UserProgressResponse {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub progress: ProgressResponse,
}

impl From<(UserProfile, StoredProgress)> for UserProgressResponse {
    fn from((user, progress): (UserProfile, StoredProgress)) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            progress: progress.into(),
        }
    }
}

/// Outcome of a completion request
#[derive(Debug, Serialize, ToSchema)]
pub struct CompletionResponse {
    pub completion_id: Uuid,
    pub activity_id: i32,
    /// True when the idempotency key matched an earlier completion
    pub replayed: bool,
    pub xp_gained: i64,
    pub levels_gained: i64,
    pub streak_changed: bool,
    pub stress_decremented: i64,
    pub level: i64,
    pub xp: i64,
    pub xp_for_next_level: i64,
    pub day_streak: i64,
    pub stress_level: Option<i64>,
    pub has_succeeded_today: bool,
}

impl From<CompletionReport> for CompletionResponse {
    fn from(report: CompletionReport) -> Self {
        Self {
            completion_id: report.completion_id,
            activity_id: report.activity_id,
            replayed: report.replayed,
            xp_gained: report.outcome.xp_gained,
            levels_gained: report.outcome.levels_gained,
            streak_changed: report.outcome.streak_changed,
            stress_decremented: report.outcome.stress_decremented,
            level: report.state.level,
            xp: report.state.xp,
            xp_for_next_level: XP_PER_LEVEL,
            day_streak: report.state.day_streak,
            stress_level: report.state.stress_level,
            has_succeeded_today: report.state.has_succeeded_today,
        }
    }
}

/// One entry of the completion log
#[derive(Debug, Serialize, ToSchema)]
pub struct CompletionRecordResponse {
    pub id: Uuid,
    pub activity_id: i32,
    pub idempotency_key: Option<Uuid>,
    pub xp_gained: i64,
    pub levels_gained: i64,
    pub streak_changed: bool,
    pub stress_decremented: i64,
    /// Level after this completion
    pub level: i64,
    pub xp: i64,
    pub day_streak: i64,
    pub occurred_at: DateTime<Utc>,
}

impl From<CompletionRecord> for CompletionRecordResponse {
    fn from(record: CompletionRecord) -> Self {
        Self {
            id: record.id,
            activity_id: record.activity_id,
            idempotency_key: record.idempotency_key,
            xp_gained: record.outcome.xp_gained,
            levels_gained: record.outcome.levels_gained,
            streak_changed: record.outcome.streak_changed,
            stress_decremented: record.outcome.stress_decremented,
            level: record.outcome.level,
            xp: record.outcome.xp,
            day_streak: record.outcome.day_streak,
            occurred_at: record.occurred_at,
        }
    }
}
