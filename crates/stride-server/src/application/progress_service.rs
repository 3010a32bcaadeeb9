//! Progress Application Service (Use Case)
//!
//! Runs the progression engine inside a read-transition-write loop. Every
//! write is version-checked; losing a race means re-reading the state and
//! recomputing, so concurrent completions fold sequentially instead of
//! overwriting each other.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use stride::{
    apply_completion, check_and_reset_streak, ActivityRepository, CommitResult, CompletionEvent,
    CompletionOutcome, CompletionRecord, DomainError, ProgressRepository, ProgressionState,
    StoredProgress, StressLevel, UserProfile,
};

use crate::config::ProgressionConfig;

const MAX_HISTORY_LIMIT: i64 = 100;

/// Result of a completion request
#[derive(Debug, Clone)]
pub struct CompletionReport {
    pub completion_id: Uuid,
    pub activity_id: i32,
    pub outcome: CompletionOutcome,
    pub state: ProgressionState,
    /// The idempotency key matched an earlier completion; nothing was applied
    pub replayed: bool,
}

/// Application service for progression operations
pub struct ProgressService<P: ProgressRepository, A: ActivityRepository> {
    progress_repo: Arc<P>,
    activity_repo: Arc<A>,
    config: ProgressionConfig,
}

impl<P: ProgressRepository, A: ActivityRepository> ProgressService<P, A> {
    pub fn new(progress_repo: Arc<P>, activity_repo: Arc<A>, config: ProgressionConfig) -> Self {
        Self {
            progress_repo,
            activity_repo,
            config,
        }
    }

    /// Register a user with default progression state
    pub async fn register_user(
        &self,
        username: String,
    ) -> Result<(UserProfile, StoredProgress), DomainError> {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(DomainError::Validation("Username must not be empty".to_string()));
        }

        let user = UserProfile::new(username);
        let progress = self.progress_repo.create_user(&user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Registered user");

        Ok((user, progress))
    }

    /// Get a user with their progression state
    pub async fn get_progress(
        &self,
        user_id: Uuid,
    ) -> Result<(UserProfile, StoredProgress), DomainError> {
        self.get_progress_at(user_id, Utc::now()).await
    }

    /// Get a user with their progression state as seen at `now`.
    ///
    /// `has_succeeded_today` is evaluated against the calendar day of `now`;
    /// the stored flag is only refreshed by writes.
    pub async fn get_progress_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(UserProfile, StoredProgress), DomainError> {
        let user = self
            .progress_repo
            .find_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;
        let mut progress = self.load(user_id).await?;

        let today = now.with_timezone(&self.config.time_zone).date_naive();
        progress.state.has_succeeded_today =
            progress.state.has_succeeded_on(today, &self.config.time_zone);

        Ok((user, progress))
    }

    /// Complete an activity now
    pub async fn complete_activity(
        &self,
        user_id: Uuid,
        activity_id: i32,
        idempotency_key: Option<Uuid>,
    ) -> Result<CompletionReport, DomainError> {
        self.complete_activity_at(user_id, activity_id, idempotency_key, Utc::now())
            .await
    }

    /// Complete an activity at an explicit instant
    pub async fn complete_activity_at(
        &self,
        user_id: Uuid,
        activity_id: i32,
        idempotency_key: Option<Uuid>,
        occurred_at: DateTime<Utc>,
    ) -> Result<CompletionReport, DomainError> {
        let activity = self
            .activity_repo
            .find_activity(activity_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Activity", activity_id))?;
        let event = CompletionEvent::new(activity.xp_reward(), occurred_at);

        for attempt in 1..=self.config.max_commit_attempts {
            if let Some(key) = idempotency_key {
                if let Some(previous) =
                    self.progress_repo.find_completion_by_key(user_id, key).await?
                {
                    return self.replay(previous).await;
                }
            }

            let stored = self.load(user_id).await?;
            let (next, outcome) = apply_completion(&stored.state, &event, &self.config.time_zone)?;
            let record =
                CompletionRecord::new(user_id, activity.id, idempotency_key, outcome, occurred_at);

            match self
                .progress_repo
                .commit_completion(stored.version, &next, &record)
                .await?
            {
                CommitResult::Committed(progress) => {
                    tracing::info!(
                        user_id = %user_id,
                        activity = %activity.name,
                        xp_gained = record.outcome.xp_gained,
                        levels_gained = record.outcome.levels_gained,
                        streak_changed = record.outcome.streak_changed,
                        stress_decremented = record.outcome.stress_decremented,
                        level = progress.state.level,
                        "Activity completed"
                    );
                    return Ok(CompletionReport {
                        completion_id: record.id,
                        activity_id: record.activity_id,
                        outcome: record.outcome,
                        state: progress.state,
                        replayed: false,
                    });
                }
                CommitResult::Duplicate(previous) => return self.replay(previous).await,
                CommitResult::VersionConflict => {
                    tracing::warn!(
                        user_id = %user_id,
                        attempt,
                        "Progress changed concurrently, recomputing completion"
                    );
                }
            }
        }

        Err(self.exhausted(user_id))
    }

    /// Session-start check: break stale streaks and refresh today's flag
    pub async fn start_session(&self, user_id: Uuid) -> Result<StoredProgress, DomainError> {
        self.start_session_at(user_id, Utc::now()).await
    }

    pub async fn start_session_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<StoredProgress, DomainError> {
        let today = now.with_timezone(&self.config.time_zone).date_naive();

        self.update_state(user_id, |state| {
            let next = check_and_reset_streak(state, today, &self.config.time_zone);
            if next.day_streak != state.day_streak {
                tracing::info!(
                    user_id = %user_id,
                    previous_streak = state.day_streak,
                    "Day streak broken"
                );
            }
            next
        })
        .await
    }

    /// Record the stress baseline produced by the lifestyle classifier
    pub async fn set_stress_baseline(
        &self,
        user_id: Uuid,
        stress: StressLevel,
    ) -> Result<StoredProgress, DomainError> {
        let progress = self
            .update_state(user_id, |state| ProgressionState {
                stress_level: Some(stress.value()),
                ..state.clone()
            })
            .await?;

        tracing::info!(user_id = %user_id, stress = %stress, "Stress baseline recorded");

        Ok(progress)
    }

    /// Completion history, most recent first
    pub async fn completion_history(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<CompletionRecord>, DomainError> {
        // 404 for unknown users rather than an empty list
        self.load(user_id).await?;

        let limit = limit.unwrap_or(20).clamp(1, MAX_HISTORY_LIMIT);
        self.progress_repo.list_completions(user_id, limit).await
    }

    async fn load(&self, user_id: Uuid) -> Result<StoredProgress, DomainError> {
        self.progress_repo
            .find_progress(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }

    async fn replay(&self, previous: CompletionRecord) -> Result<CompletionReport, DomainError> {
        let current = self.load(previous.user_id).await?;

        tracing::info!(
            user_id = %previous.user_id,
            completion_id = %previous.id,
            "Replayed completion for repeated idempotency key"
        );

        Ok(CompletionReport {
            completion_id: previous.id,
            activity_id: previous.activity_id,
            outcome: previous.outcome,
            state: current.state,
            replayed: true,
        })
    }

    /// Version-checked read-modify-write of the state, skipping no-op writes
    async fn update_state<F>(&self, user_id: Uuid, transition: F) -> Result<StoredProgress, DomainError>
    where
        F: Fn(&ProgressionState) -> ProgressionState,
    {
        for attempt in 1..=self.config.max_commit_attempts {
            let stored = self.load(user_id).await?;
            let next = transition(&stored.state);
            if next == stored.state {
                return Ok(stored);
            }

            match self
                .progress_repo
                .save_progress(user_id, stored.version, &next)
                .await?
            {
                Some(saved) => return Ok(saved),
                None => tracing::warn!(user_id = %user_id, attempt, "Progress changed concurrently, retrying"),
            }
        }

        Err(self.exhausted(user_id))
    }

    fn exhausted(&self, user_id: Uuid) -> DomainError {
        tracing::error!(
            user_id = %user_id,
            attempts = self.config.max_commit_attempts,
            "Giving up on progress update after repeated conflicts"
        );
        DomainError::Conflict(format!(
            "Progress of user {} kept changing; retried {} times",
            user_id, self.config.max_commit_attempts
        ))
    }
}
