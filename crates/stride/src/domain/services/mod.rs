//! Domain Services
//!
//! Stateless domain logic operating on entities passed by value.

pub mod progression;

pub use progression::{
    apply_completion, check_and_reset_streak, LEVELS_PER_MILESTONE, STREAK_BREAK_DAYS,
    STRESS_FLOOR, XP_PER_LEVEL,
};
