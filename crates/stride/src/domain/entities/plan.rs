//! Activity Plan - A user's selection of catalog activities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Activity;

/// One plan per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ActivityPlan {
    pub fn new_for_user(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// Plan membership joined with its catalog activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedActivity {
    pub plan_id: Uuid,
    pub activity: Activity,
    pub success_count: i32,
    pub is_chosen: bool,
}
