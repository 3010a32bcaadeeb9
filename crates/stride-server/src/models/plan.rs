//! Plan DTOs - Activities a user picked from the catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use stride::{ActivityPlan, NewPlannedActivity, PlannedActivity};

use super::ActivityResponse;

/// Activity plan
#[derive(Debug, Serialize, ToSchema)]
pub struct PlanResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityPlan> for PlanResponse {
    fn from(plan: ActivityPlan) -> Self {
        Self {
            id: plan.id,
            user_id: plan.user_id,
            created_at: plan.created_at,
        }
    }
}

/// Planned activity with its catalog entry
#[derive(Debug, Serialize, ToSchema)]
pub struct PlannedActivityResponse {
    pub activity: ActivityResponse,
    pub success_count: i32,
    pub is_chosen: bool,
}

impl From<PlannedActivity> for PlannedActivityResponse {
    fn from(planned: PlannedActivity) -> Self {
        Self {
            activity: planned.activity.into(),
            success_count: planned.success_count,
            is_chosen: planned.is_chosen,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlanActivityItem {
    pub activity_id: i32,
    #[serde(default)]
    pub is_chosen: bool,
}

impl From<PlanActivityItem> for NewPlannedActivity {
    fn from(item: PlanActivityItem) -> Self {
        Self {
            activity_id: item.activity_id,
            is_chosen: item.is_chosen,
        }
    }
}

/// Bulk add activities to a plan
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddPlanActivitiesRequest {
    pub activities: Vec<PlanActivityItem>,
}

/// Toggle the chosen flag of a planned activity
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetChosenRequest {
    pub is_chosen: bool,
}

#[derive(Debug, Deserialize)]
pub struct PlanActivitiesQuery {
    #[serde(default)]
    pub chosen_only: bool,
}
