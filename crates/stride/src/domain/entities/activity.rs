//! Activity catalog entities

use serde::{Deserialize, Serialize};

use crate::domain::ActivityType;

/// A catalog activity a user can pick and complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i32,
    pub name: String,
    /// Suggested duration in minutes
    pub base_time: Option<i32>,
    /// XP granted on completion (absent = 0)
    pub base_xp: Option<i32>,
    pub activity_type: Option<ActivityType>,
    pub description: Option<String>,
}

impl Activity {
    /// XP reward fed into the progression engine
    pub fn xp_reward(&self) -> i64 {
        self.base_xp.map(i64::from).unwrap_or(0)
    }
}

/// Lifestyle category used to group activities (e.g. "Night Owl", "Desk Worker")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifestyleCategory {
    pub id: i32,
    pub name: String,
}
