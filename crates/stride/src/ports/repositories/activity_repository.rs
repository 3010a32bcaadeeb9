//! Activity Repository Port
//!
//! Read access to the activity catalog plus per-user lifestyle selections.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Activity, LifestyleCategory};

/// Repository interface for catalog data
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Find an activity by ID
    async fn find_activity(&self, id: i32) -> Result<Option<Activity>, DomainError>;

    /// All catalog activities
    async fn list_activities(&self) -> Result<Vec<Activity>, DomainError>;

    /// Activities tagged with any of the given lifestyle categories (distinct)
    async fn list_by_lifestyles(&self, lifestyle_ids: &[i32]) -> Result<Vec<Activity>, DomainError>;

    /// All lifestyle categories
    async fn list_lifestyles(&self) -> Result<Vec<LifestyleCategory>, DomainError>;

    /// Lifestyle categories selected by a user
    async fn list_user_lifestyles(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<LifestyleCategory>, DomainError>;

    /// Add lifestyle selections for a user, returns the user's full selection
    async fn add_user_lifestyles(
        &self,
        user_id: Uuid,
        lifestyle_ids: &[i32],
    ) -> Result<Vec<LifestyleCategory>, DomainError>;

    /// Remove all lifestyle selections of a user, returns the number removed
    async fn delete_user_lifestyles(&self, user_id: Uuid) -> Result<u64, DomainError>;
}
