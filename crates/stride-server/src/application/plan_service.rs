//! Plan Application Service (Use Case)
//!
//! Manages the single activity plan each user picks activities into.

use std::sync::Arc;
use uuid::Uuid;

use stride::{ActivityPlan, DomainError, NewPlannedActivity, PlanRepository, PlannedActivity};

/// Application service for activity plans
pub struct PlanService<R: PlanRepository> {
    repo: Arc<R>,
}

impl<R: PlanRepository> PlanService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create the user's plan, or return the existing one
    pub async fn create_plan(&self, user_id: Uuid) -> Result<ActivityPlan, DomainError> {
        if let Some(existing) = self.repo.find_by_user(user_id).await? {
            return Ok(existing);
        }

        let plan = self.repo.create(&ActivityPlan::new_for_user(user_id)).await?;
        tracing::info!(user_id = %user_id, plan_id = %plan.id, "Created activity plan");

        Ok(plan)
    }

    pub async fn get_plan(&self, user_id: Uuid) -> Result<ActivityPlan, DomainError> {
        self.repo
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("ActivityPlan", user_id))
    }

    /// Add activities to the user's plan
    pub async fn add_activities(
        &self,
        user_id: Uuid,
        items: Vec<NewPlannedActivity>,
    ) -> Result<Vec<PlannedActivity>, DomainError> {
        if items.is_empty() {
            return Err(DomainError::Validation(
                "At least one activity is required".to_string(),
            ));
        }

        let plan = self.get_plan(user_id).await?;
        let added = self.repo.add_activities(plan.id, &items).await?;
        tracing::info!(plan_id = %plan.id, count = added.len(), "Added activities to plan");

        Ok(added)
    }

    /// Mark one plan activity as chosen or not
    pub async fn set_chosen(
        &self,
        user_id: Uuid,
        activity_id: i32,
        is_chosen: bool,
    ) -> Result<(), DomainError> {
        let plan = self.get_plan(user_id).await?;
        if !self.repo.set_chosen(plan.id, activity_id, is_chosen).await? {
            return Err(DomainError::not_found("PlannedActivity", activity_id));
        }

        Ok(())
    }

    /// Remove every activity from the user's plan
    pub async fn clear_activities(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let plan = self.get_plan(user_id).await?;
        let removed = self.repo.clear_activities(plan.id).await?;
        if removed == 0 {
            return Err(DomainError::not_found("PlannedActivity", plan.id));
        }

        tracing::info!(plan_id = %plan.id, removed, "Cleared plan activities");
        Ok(removed)
    }

    pub async fn list_activities(
        &self,
        user_id: Uuid,
        chosen_only: bool,
    ) -> Result<Vec<PlannedActivity>, DomainError> {
        let plan = self.get_plan(user_id).await?;
        self.repo.list_planned(plan.id, chosen_only).await
    }

    /// Chosen activities for the dashboard; a user without a plan has none
    pub async fn chosen_activities(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PlannedActivity>, DomainError> {
        match self.repo.find_by_user(user_id).await? {
            Some(plan) => self.repo.list_planned(plan.id, true).await,
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryStore;

    fn item(activity_id: i32, is_chosen: bool) -> NewPlannedActivity {
        NewPlannedActivity {
            activity_id,
            is_chosen,
        }
    }

    #[tokio::test]
    async fn test_create_plan_is_idempotent() {
        let svc = PlanService::new(Arc::new(InMemoryStore::default()));
        let user_id = Uuid::new_v4();

        let first = svc.create_plan(user_id).await.unwrap();
        let second = svc.create_plan(user_id).await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_plan_activity_lifecycle() {
        let store = Arc::new(InMemoryStore::default());
        let walk = store.add_activity("Walk", Some(10)).await;
        let yoga = store.add_activity("Yoga", Some(30)).await;
        let svc = PlanService::new(store);
        let user_id = Uuid::new_v4();
        svc.create_plan(user_id).await.unwrap();

        let added = svc
            .add_activities(user_id, vec![item(walk, true), item(yoga, false)])
            .await
            .unwrap();
        assert_eq!(added.len(), 2);
        assert!(added.iter().all(|p| p.success_count == 0));

        assert_eq!(svc.chosen_activities(user_id).await.unwrap().len(), 1);

        svc.set_chosen(user_id, yoga, true).await.unwrap();
        assert_eq!(svc.list_activities(user_id, true).await.unwrap().len(), 2);

        assert!(matches!(
            svc.set_chosen(user_id, 404, true).await,
            Err(DomainError::NotFound { .. })
        ));

        assert_eq!(svc.clear_activities(user_id).await.unwrap(), 2);
        assert!(svc.list_activities(user_id, false).await.unwrap().is_empty());
        assert!(matches!(
            svc.clear_activities(user_id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_operations_without_plan() {
        let svc = PlanService::new(Arc::new(InMemoryStore::default()));
        let user_id = Uuid::new_v4();

        assert!(svc.chosen_activities(user_id).await.unwrap().is_empty());
        assert!(matches!(
            svc.add_activities(user_id, vec![item(1, true)]).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            svc.add_activities(user_id, vec![]).await,
            Err(DomainError::Validation(_))
        ));
    }
}
