//! Progression - XP, level, day streak and stress state of a user
//!
//! Pure domain entities without infrastructure dependencies. The only code
//! allowed to move a `ProgressionState` forward is
//! [`crate::domain::services::progression`].

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::services::progression::XP_PER_LEVEL;

/// Progression state of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Always >= 1
    pub level: i64,
    /// Always in `0..XP_PER_LEVEL`
    pub xp: i64,
    /// Consecutive calendar days with at least one completion
    pub day_streak: i64,
    /// Baseline stress score, absent until the user has been assessed
    pub stress_level: Option<i64>,
    /// Moment of the most recent streak-qualifying completion
    pub last_success_at: Option<DateTime<Utc>>,
    /// A streak-qualifying completion was already recorded today
    pub has_succeeded_today: bool,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            day_streak: 0,
            stress_level: None,
            last_success_at: None,
            has_succeeded_today: false,
        }
    }
}

impl ProgressionState {
    /// Calendar date of the last success in the given zone
    pub fn last_success_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.last_success_at
            .map(|at| at.with_timezone(tz).date_naive())
    }

    /// Whether a streak-qualifying completion falls on `today` in the given zone.
    ///
    /// This is the authoritative form of `has_succeeded_today`; the stored flag
    /// can go stale once the calendar day rolls over.
    pub fn has_succeeded_on<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> bool {
        self.last_success_date(tz) == Some(today)
    }

    /// XP still missing until the next level-up
    pub fn xp_to_next_level(&self) -> i64 {
        XP_PER_LEVEL - self.xp
    }
}

/// A single activity completion, supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub activity_xp_reward: i64,
    pub occurred_at: DateTime<Utc>,
}

impl CompletionEvent {
    pub fn new(activity_xp_reward: i64, occurred_at: DateTime<Utc>) -> Self {
        Self {
            activity_xp_reward,
            occurred_at,
        }
    }
}

/// User-visible result of applying a completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    pub xp_gained: i64,
    pub levels_gained: i64,
    pub streak_changed: bool,
    /// Stress decrements actually applied (after clamping at the floor)
    pub stress_decremented: i64,
    pub level: i64,
    pub xp: i64,
    pub day_streak: i64,
}

/// Persisted progression state with its optimistic-concurrency version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProgress {
    pub user_id: Uuid,
    pub version: i64,
    pub state: ProgressionState,
    pub updated_at: DateTime<Utc>,
}

/// Audit row written in the same transaction as the state it produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_id: i32,
    pub idempotency_key: Option<Uuid>,
    pub outcome: CompletionOutcome,
    pub occurred_at: DateTime<Utc>,
}

impl CompletionRecord {
    pub fn new(
        user_id: Uuid,
        activity_id: i32,
        idempotency_key: Option<Uuid>,
        outcome: CompletionOutcome,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            activity_id,
            idempotency_key,
            outcome,
            occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_default_state() {
        let state = ProgressionState::default();
        assert_eq!(state.level, 1);
        assert_eq!(state.xp, 0);
        assert_eq!(state.day_streak, 0);
        assert!(state.stress_level.is_none());
        assert!(!state.has_succeeded_today);
        assert_eq!(state.xp_to_next_level(), 100);
    }

    #[test]
    fn test_has_succeeded_on_uses_zone_date() {
        // 2024-01-01 20:00 UTC is already 2024-01-02 in Bangkok
        let state = ProgressionState {
            last_success_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap()),
            ..ProgressionState::default()
        };
        let bangkok = FixedOffset::east_opt(7 * 3600).unwrap();
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        assert!(state.has_succeeded_on(jan1, &Utc));
        assert!(!state.has_succeeded_on(jan2, &Utc));
        assert!(state.has_succeeded_on(jan2, &bangkok));
    }

    #[test]
    fn test_never_succeeded() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(!ProgressionState::default().has_succeeded_on(today, &Utc));
    }
}
