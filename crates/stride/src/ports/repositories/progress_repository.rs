//! Progress Repository Port
//!
//! Persistence for users and their progression state. Every write of a
//! `ProgressionState` goes through an optimistic version check so that two
//! concurrent transitions computed from the same stale state cannot both land.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    errors::DomainError, CompletionRecord, ProgressionState, StoredProgress, UserProfile,
};

/// Result of an atomic completion commit
#[derive(Debug, Clone)]
pub enum CommitResult {
    /// State, completion record and plan counter were written together
    Committed(StoredProgress),
    /// Stored version moved on since the state was read; nothing was written
    VersionConflict,
    /// A completion with the same idempotency key already exists; nothing was written
    Duplicate(CompletionRecord),
}

/// Repository interface for users and progression state
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Insert a user together with default progression state
    async fn create_user(&self, user: &UserProfile) -> Result<StoredProgress, DomainError>;

    /// Find a user profile by ID
    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserProfile>, DomainError>;

    /// Find progression state for a user
    async fn find_progress(&self, user_id: Uuid) -> Result<Option<StoredProgress>, DomainError>;

    /// Replace progression state if the stored version still equals `expected_version`.
    ///
    /// Returns `None` on version mismatch.
    async fn save_progress(
        &self,
        user_id: Uuid,
        expected_version: i64,
        state: &ProgressionState,
    ) -> Result<Option<StoredProgress>, DomainError>;

    /// Atomically write the new state (version-checked), the completion record
    /// and the plan success counter for the completed activity.
    async fn commit_completion(
        &self,
        expected_version: i64,
        state: &ProgressionState,
        record: &CompletionRecord,
    ) -> Result<CommitResult, DomainError>;

    /// Find a previous completion by its idempotency key
    async fn find_completion_by_key(
        &self,
        user_id: Uuid,
        key: Uuid,
    ) -> Result<Option<CompletionRecord>, DomainError>;

    /// Most recent completions first
    async fn list_completions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<CompletionRecord>, DomainError>;
}
