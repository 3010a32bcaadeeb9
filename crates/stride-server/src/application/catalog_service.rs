//! Catalog Application Service (Use Case)
//!
//! Activity catalog lookups and per-user lifestyle selections.

use std::sync::Arc;
use uuid::Uuid;

use stride::{Activity, ActivityRepository, DomainError, LifestyleCategory};

/// Application service for catalog operations
pub struct CatalogService<A: ActivityRepository> {
    repo: Arc<A>,
}

impl<A: ActivityRepository> CatalogService<A> {
    pub fn new(repo: Arc<A>) -> Self {
        Self { repo }
    }

    pub async fn list_lifestyles(&self) -> Result<Vec<LifestyleCategory>, DomainError> {
        self.repo.list_lifestyles().await
    }

    /// All activities, or only those tagged with one of `lifestyle_ids`
    pub async fn list_activities(
        &self,
        lifestyle_ids: Option<Vec<i32>>,
    ) -> Result<Vec<Activity>, DomainError> {
        match lifestyle_ids {
            Some(ids) if !ids.is_empty() => self.repo.list_by_lifestyles(&ids).await,
            _ => self.repo.list_activities().await,
        }
    }

    pub async fn get_activity(&self, id: i32) -> Result<Activity, DomainError> {
        self.repo
            .find_activity(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Activity", id))
    }

    pub async fn user_lifestyles(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<LifestyleCategory>, DomainError> {
        self.repo.list_user_lifestyles(user_id).await
    }

    /// Add lifestyle selections; already-selected categories are ignored
    pub async fn add_user_lifestyles(
        &self,
        user_id: Uuid,
        lifestyle_ids: Vec<i32>,
    ) -> Result<Vec<LifestyleCategory>, DomainError> {
        if lifestyle_ids.is_empty() {
            return Err(DomainError::Validation(
                "At least one lifestyle id is required".to_string(),
            ));
        }

        let selected = self.repo.add_user_lifestyles(user_id, &lifestyle_ids).await?;
        tracing::info!(user_id = %user_id, count = selected.len(), "Updated lifestyle selection");

        Ok(selected)
    }

    /// Remove every lifestyle selection of a user
    pub async fn clear_user_lifestyles(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let removed = self.repo.delete_user_lifestyles(user_id).await?;
        if removed == 0 {
            return Err(DomainError::not_found("UserLifestyle", user_id));
        }

        tracing::info!(user_id = %user_id, removed, "Cleared lifestyle selection");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryStore;

    #[tokio::test]
    async fn test_filter_by_lifestyles() {
        let store = Arc::new(InMemoryStore::default());
        let walk = store.add_activity("Walk", Some(10)).await;
        let nap = store.add_activity("Power nap", Some(5)).await;
        let read = store.add_activity("Read", Some(15)).await;
        let outdoorsy = store.add_lifestyle("Outdoorsy", &[walk]).await;
        let tired = store.add_lifestyle("Tired", &[nap, walk]).await;
        let svc = CatalogService::new(store);

        let all = svc.list_activities(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let filtered = svc.list_activities(Some(vec![outdoorsy, tired])).await.unwrap();
        let ids: Vec<i32> = filtered.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![walk, nap]);
        assert!(!ids.contains(&read));

        assert_eq!(svc.list_activities(Some(vec![])).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_get_missing_activity() {
        let svc = CatalogService::new(Arc::new(InMemoryStore::default()));
        assert!(matches!(
            svc.get_activity(7).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_user_lifestyle_selection() {
        let store = Arc::new(InMemoryStore::default());
        let night_owl = store.add_lifestyle("Night owl", &[]).await;
        let desk = store.add_lifestyle("Desk worker", &[]).await;
        let svc = CatalogService::new(store);
        let user_id = Uuid::new_v4();

        assert!(matches!(
            svc.add_user_lifestyles(user_id, vec![]).await,
            Err(DomainError::Validation(_))
        ));

        svc.add_user_lifestyles(user_id, vec![night_owl]).await.unwrap();
        let selected = svc
            .add_user_lifestyles(user_id, vec![night_owl, desk])
            .await
            .unwrap();
        assert_eq!(selected.len(), 2);

        assert_eq!(svc.clear_user_lifestyles(user_id).await.unwrap(), 2);
        assert!(svc.user_lifestyles(user_id).await.unwrap().is_empty());
        assert!(matches!(
            svc.clear_user_lifestyles(user_id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
