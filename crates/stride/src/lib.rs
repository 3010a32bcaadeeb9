//! Stride Domain Library
//!
//! Core domain types and interfaces for the Stride habit tracker.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (ProgressionState, Activity, ActivityPlan, ...)
//!   - `value_objects/`: Immutable value types (ActivityType, StressLevel)
//!   - `services/`: The progression engine (XP, levels, streaks, stress decay)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!
//! # Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use stride::{apply_completion, CompletionEvent, ProgressionState};
//!
//! let state = ProgressionState { level: 1, xp: 80, ..ProgressionState::default() };
//! let event = CompletionEvent::new(250, Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap());
//!
//! let (next, outcome) = apply_completion(&state, &event, &Utc).unwrap();
//! assert_eq!((next.level, next.xp, outcome.levels_gained), (4, 30, 3));
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    apply_completion, check_and_reset_streak, Activity, ActivityPlan, ActivityType,
    CompletionEvent, CompletionOutcome, CompletionRecord, DomainError, LifestyleCategory,
    PlannedActivity, ProgressionError, ProgressionState, StoredProgress, StressLevel,
    UserProfile, LEVELS_PER_MILESTONE, STRESS_FLOOR, XP_PER_LEVEL,
};
pub use ports::{
    ActivityRepository, CommitResult, NewPlannedActivity, PlanRepository, ProgressRepository,
};
