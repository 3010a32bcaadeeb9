//! Progression Engine
//!
//! Pure state transition for activity completions:
//!
//! 1. Streak: the first completion of a calendar day extends the streak.
//! 2. XP: rewards accumulate and overflow into levels, possibly several at once.
//! 3. Stress: every crossed 100-level milestone lowers the stress score by one,
//!    never below [`STRESS_FLOOR`].
//!
//! No clock, no I/O. Calendar dates are always taken in the time zone the
//! caller passes in.

use chrono::{NaiveDate, TimeZone};

use crate::domain::{CompletionEvent, CompletionOutcome, ProgressionError, ProgressionState};

/// XP needed for one level
pub const XP_PER_LEVEL: i64 = 100;

/// Levels per stress milestone
pub const LEVELS_PER_MILESTONE: i64 = 100;

/// Lowest stress score decay can reach
pub const STRESS_FLOOR: i64 = 1;

/// Days without a success after which the streak is broken at session start
pub const STREAK_BREAK_DAYS: i64 = 2;

/// Apply one completion to a progression state.
///
/// Returns the next state together with the outcome to report. A negative
/// reward is rejected with [`ProgressionError::InvalidEvent`] before anything
/// is computed.
pub fn apply_completion<Tz: TimeZone>(
    state: &ProgressionState,
    event: &CompletionEvent,
    tz: &Tz,
) -> Result<(ProgressionState, CompletionOutcome), ProgressionError> {
    let reward = event.activity_xp_reward;
    if reward < 0 {
        return Err(ProgressionError::InvalidEvent { reward });
    }

    // Step 1: streak (at most once per calendar day, never reset here)
    let today = event.occurred_at.with_timezone(tz).date_naive();
    let streak_changed = state.last_success_date(tz) != Some(today);
    let (day_streak, last_success_at) = if streak_changed {
        (state.day_streak.saturating_add(1), Some(event.occurred_at))
    } else {
        (state.day_streak, state.last_success_at)
    };

    // Step 2: XP overflow into levels
    let raw_xp = state.xp.saturating_add(reward);
    let levels_gained = raw_xp.div_euclid(XP_PER_LEVEL);
    let xp = raw_xp.rem_euclid(XP_PER_LEVEL);
    let level = state.level.saturating_add(levels_gained);

    // Step 3: stress decay per milestone crossed
    let crossings = milestone(level) - milestone(state.level);
    let (stress_level, stress_decremented) = decay_stress(state.stress_level, crossings);

    let next = ProgressionState {
        level,
        xp,
        day_streak,
        stress_level,
        last_success_at,
        has_succeeded_today: true,
    };

    let outcome = CompletionOutcome {
        xp_gained: reward,
        levels_gained,
        streak_changed,
        stress_decremented,
        level,
        xp,
        day_streak,
    };

    Ok((next, outcome))
}

/// Session-start streak check.
///
/// Breaks the streak when [`STREAK_BREAK_DAYS`] or more calendar days have
/// passed since the last success, and refreshes `has_succeeded_today` for
/// `today`. XP, level, stress and `last_success_at` are left alone.
pub fn check_and_reset_streak<Tz: TimeZone>(
    state: &ProgressionState,
    today: NaiveDate,
    tz: &Tz,
) -> ProgressionState {
    let mut next = state.clone();

    if let Some(last) = state.last_success_date(tz) {
        if (today - last).num_days() >= STREAK_BREAK_DAYS {
            next.day_streak = 0;
        }
    }
    next.has_succeeded_today = state.has_succeeded_on(today, tz);

    next
}

fn milestone(level: i64) -> i64 {
    level.div_euclid(LEVELS_PER_MILESTONE)
}

/// Returns the decayed stress score and how many decrements were applied.
fn decay_stress(stress_level: Option<i64>, crossings: i64) -> (Option<i64>, i64) {
    match stress_level {
        Some(stress) if crossings > 0 => {
            let applied = crossings.min((stress - STRESS_FLOOR).max(0));
            (Some(stress - applied), applied)
        }
        other => (other, 0),
    }
}
