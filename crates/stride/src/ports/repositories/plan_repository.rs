//! Plan Repository Port
//!
//! Abstract interface for activity plan persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, ActivityPlan, PlannedActivity};

/// Plan membership to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlannedActivity {
    pub activity_id: i32,
    pub is_chosen: bool,
}

/// Repository interface for activity plans
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Find the plan of a user
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<ActivityPlan>, DomainError>;

    /// Save a new plan
    async fn create(&self, plan: &ActivityPlan) -> Result<ActivityPlan, DomainError>;

    /// Add activities to a plan with a zero success count
    async fn add_activities(
        &self,
        plan_id: Uuid,
        items: &[NewPlannedActivity],
    ) -> Result<Vec<PlannedActivity>, DomainError>;

    /// Set the chosen flag of one plan activity, false if it is not in the plan
    async fn set_chosen(
        &self,
        plan_id: Uuid,
        activity_id: i32,
        is_chosen: bool,
    ) -> Result<bool, DomainError>;

    /// Remove every activity from a plan, returns the number removed
    async fn clear_activities(&self, plan_id: Uuid) -> Result<u64, DomainError>;

    /// Activities in a plan, optionally only the chosen ones
    async fn list_planned(
        &self,
        plan_id: Uuid,
        chosen_only: bool,
    ) -> Result<Vec<PlannedActivity>, DomainError>;
}
