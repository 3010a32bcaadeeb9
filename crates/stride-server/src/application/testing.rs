//! In-memory implementations of the repository ports for service tests

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use tokio::sync::Mutex;
use uuid::Uuid;

use stride::{
    Activity, ActivityPlan, ActivityRepository, ActivityType, CommitResult, CompletionRecord,
    DomainError, LifestyleCategory, NewPlannedActivity, PlanRepository, PlannedActivity,
    ProgressRepository, ProgressionState, StoredProgress, UserProfile,
};

struct PlanEntry {
    plan_id: Uuid,
    activity_id: i32,
    success_count: i32,
    is_chosen: bool,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, UserProfile>,
    progress: HashMap<Uuid, StoredProgress>,
    completions: Vec<CompletionRecord>,
    /// States another writer will land right before our next write
    interleaved: HashMap<Uuid, VecDeque<ProgressionState>>,
    /// Users whose next completion commit loses to an identical request
    racing_twins: HashSet<Uuid>,
    activities: BTreeMap<i32, Activity>,
    lifestyles: BTreeMap<i32, LifestyleCategory>,
    activity_styles: Vec<(i32, i32)>,
    user_lifestyles: Vec<(Uuid, i32)>,
    plans: HashMap<Uuid, ActivityPlan>,
    plan_entries: Vec<PlanEntry>,
}

impl Inner {
    fn land_interleaved_write(&mut self, user_id: Uuid) {
        let pending = self
            .interleaved
            .get_mut(&user_id)
            .and_then(|queue| queue.pop_front());
        if let (Some(state), Some(progress)) = (pending, self.progress.get_mut(&user_id)) {
            progress.state = state;
            progress.version += 1;
        }
    }

    /// Commit a copy of `record` under a fresh id, as the twin request would
    fn land_racing_twin(&mut self, state: &ProgressionState, record: &CompletionRecord) {
        if !self.racing_twins.remove(&record.user_id) {
            return;
        }
        if let Some(progress) = self.progress.get_mut(&record.user_id) {
            progress.state = state.clone();
            progress.version += 1;
            progress.updated_at = Utc::now();
        }
        self.bump_success(record.user_id, record.activity_id);
        self.completions.push(CompletionRecord {
            id: Uuid::new_v4(),
            ..record.clone()
        });
    }

    fn bump_success(&mut self, user_id: Uuid, activity_id: i32) {
        let plan_ids: Vec<Uuid> = self
            .plans
            .values()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.id)
            .collect();
        for entry in self.plan_entries.iter_mut() {
            if plan_ids.contains(&entry.plan_id) && entry.activity_id == activity_id {
                entry.success_count += 1;
            }
        }
    }

    fn planned(&self, entry: &PlanEntry) -> Option<PlannedActivity> {
        self.activities
            .get(&entry.activity_id)
            .map(|activity| PlannedActivity {
                plan_id: entry.plan_id,
                activity: activity.clone(),
                success_count: entry.success_count,
                is_chosen: entry.is_chosen,
            })
    }

    fn lifestyles_of(&self, user_id: Uuid) -> Vec<LifestyleCategory> {
        self.lifestyles
            .values()
            .filter(|l| self.user_lifestyles.contains(&(user_id, l.id)))
            .cloned()
            .collect()
    }
}

/// Shared in-memory store implementing every repository port
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub async fn add_activity(&self, name: &str, base_xp: Option<i32>) -> i32 {
        let mut inner = self.inner.lock().await;
        let id = inner.activities.len() as i32 + 1;
        inner.activities.insert(
            id,
            Activity {
                id,
                name: name.to_string(),
                base_time: Some(15),
                base_xp,
                activity_type: Some(ActivityType::Indoor),
                description: None,
            },
        );
        id
    }

    pub async fn add_lifestyle(&self, name: &str, activity_ids: &[i32]) -> i32 {
        let mut inner = self.inner.lock().await;
        let id = inner.lifestyles.len() as i32 + 1;
        inner.lifestyles.insert(
            id,
            LifestyleCategory {
                id,
                name: name.to_string(),
            },
        );
        for activity_id in activity_ids {
            inner.activity_styles.push((*activity_id, id));
        }
        id
    }

    /// Create a plan with the given activities already chosen
    pub async fn add_plan(&self, user_id: Uuid, activity_ids: &[i32]) -> Uuid {
        let mut inner = self.inner.lock().await;
        let plan = ActivityPlan::new_for_user(user_id);
        for activity_id in activity_ids {
            inner.plan_entries.push(PlanEntry {
                plan_id: plan.id,
                activity_id: *activity_id,
                success_count: 0,
                is_chosen: true,
            });
        }
        let id = plan.id;
        inner.plans.insert(id, plan);
        id
    }

    pub async fn success_count(&self, plan_id: Uuid, activity_id: i32) -> Option<i32> {
        let inner = self.inner.lock().await;
        inner
            .plan_entries
            .iter()
            .find(|e| e.plan_id == plan_id && e.activity_id == activity_id)
            .map(|e| e.success_count)
    }

    /// Simulate an identical request (same idempotency key) that passed the
    /// key check alongside ours and commits first
    pub async fn race_same_key(&self, user_id: Uuid) {
        self.inner.lock().await.racing_twins.insert(user_id);
    }

    /// Simulate a concurrent writer landing `state` just before our next write
    pub async fn interleave_write(&self, user_id: Uuid, state: ProgressionState) {
        let mut inner = self.inner.lock().await;
        inner.interleaved.entry(user_id).or_default().push_back(state);
    }
}

#[async_trait]
impl ProgressRepository for InMemoryStore {
    async fn create_user(&self, user: &UserProfile) -> Result<StoredProgress, DomainError> {
        let mut inner = self.inner.lock().await;
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(DomainError::Conflict(format!(
                "Username already registered: {}",
                user.username
            )));
        }

        let progress = StoredProgress {
            user_id: user.id,
            version: 0,
            state: ProgressionState::default(),
            updated_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        inner.progress.insert(user.id, progress.clone());
        Ok(progress)
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.inner.lock().await.users.get(&user_id).cloned())
    }

    async fn find_progress(&self, user_id: Uuid) -> Result<Option<StoredProgress>, DomainError> {
        Ok(self.inner.lock().await.progress.get(&user_id).cloned())
    }

    async fn save_progress(
        &self,
        user_id: Uuid,
        expected_version: i64,
        state: &ProgressionState,
    ) -> Result<Option<StoredProgress>, DomainError> {
        let mut inner = self.inner.lock().await;
        inner.land_interleaved_write(user_id);

        let progress = inner
            .progress
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::not_found("User", user_id))?;
        if progress.version != expected_version {
            return Ok(None);
        }

        progress.state = state.clone();
        progress.version += 1;
        progress.updated_at = Utc::now();
        Ok(Some(progress.clone()))
    }

    async fn commit_completion(
        &self,
        expected_version: i64,
        state: &ProgressionState,
        record: &CompletionRecord,
    ) -> Result<CommitResult, DomainError> {
        let mut inner = self.inner.lock().await;
        inner.land_interleaved_write(record.user_id);
        inner.land_racing_twin(state, record);

        if let Some(key) = record.idempotency_key {
            if let Some(previous) = inner
                .completions
                .iter()
                .find(|c| c.user_id == record.user_id && c.idempotency_key == Some(key))
            {
                return Ok(CommitResult::Duplicate(previous.clone()));
            }
        }

        let progress = inner
            .progress
            .get_mut(&record.user_id)
            .ok_or_else(|| DomainError::not_found("User", record.user_id))?;
        if progress.version != expected_version {
            return Ok(CommitResult::VersionConflict);
        }

        progress.state = state.clone();
        progress.version += 1;
        progress.updated_at = Utc::now();
        let committed = progress.clone();

        inner.bump_success(record.user_id, record.activity_id);
        inner.completions.push(record.clone());

        Ok(CommitResult::Committed(committed))
    }

    async fn find_completion_by_key(
        &self,
        user_id: Uuid,
        key: Uuid,
    ) -> Result<Option<CompletionRecord>, DomainError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .completions
            .iter()
            .find(|c| c.user_id == user_id && c.idempotency_key == Some(key))
            .cloned())
    }

    async fn list_completions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<CompletionRecord>, DomainError> {
        let inner = self.inner.lock().await;
        let mut records: Vec<CompletionRecord> = inner
            .completions
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        records.truncate(limit.max(0) as usize);
        Ok(records)
    }
}

#[async_trait]
impl ActivityRepository for InMemoryStore {
    async fn find_activity(&self, id: i32) -> Result<Option<Activity>, DomainError> {
        Ok(self.inner.lock().await.activities.get(&id).cloned())
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, DomainError> {
        Ok(self.inner.lock().await.activities.values().cloned().collect())
    }

    async fn list_by_lifestyles(&self, lifestyle_ids: &[i32]) -> Result<Vec<Activity>, DomainError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .activities
            .values()
            .filter(|a| {
                inner
                    .activity_styles
                    .iter()
                    .any(|(activity_id, lifestyle_id)| {
                        *activity_id == a.id && lifestyle_ids.contains(lifestyle_id)
                    })
            })
            .cloned()
            .collect())
    }

    async fn list_lifestyles(&self) -> Result<Vec<LifestyleCategory>, DomainError> {
        Ok(self.inner.lock().await.lifestyles.values().cloned().collect())
    }

    async fn list_user_lifestyles(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<LifestyleCategory>, DomainError> {
        Ok(self.inner.lock().await.lifestyles_of(user_id))
    }

    async fn add_user_lifestyles(
        &self,
        user_id: Uuid,
        lifestyle_ids: &[i32],
    ) -> Result<Vec<LifestyleCategory>, DomainError> {
        let mut inner = self.inner.lock().await;
        for id in lifestyle_ids {
            if !inner.lifestyles.contains_key(id) {
                return Err(DomainError::not_found("LifestyleCategory", id));
            }
            if !inner.user_lifestyles.contains(&(user_id, *id)) {
                inner.user_lifestyles.push((user_id, *id));
            }
        }
        Ok(inner.lifestyles_of(user_id))
    }

    async fn delete_user_lifestyles(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let mut inner = self.inner.lock().await;
        let before = inner.user_lifestyles.len();
        inner.user_lifestyles.retain(|(u, _)| *u != user_id);
        Ok((before - inner.user_lifestyles.len()) as u64)
    }
}

#[async_trait]
impl PlanRepository for InMemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<ActivityPlan>, DomainError> {
        let inner = self.inner.lock().await;
        Ok(inner.plans.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn create(&self, plan: &ActivityPlan) -> Result<ActivityPlan, DomainError> {
        let mut inner = self.inner.lock().await;
        inner.plans.insert(plan.id, plan.clone());
        Ok(plan.clone())
    }

    async fn add_activities(
        &self,
        plan_id: Uuid,
        items: &[NewPlannedActivity],
    ) -> Result<Vec<PlannedActivity>, DomainError> {
        let mut inner = self.inner.lock().await;
        let mut added = Vec::with_capacity(items.len());

        for item in items {
            if !inner.activities.contains_key(&item.activity_id) {
                return Err(DomainError::not_found("Activity", item.activity_id));
            }
            if inner
                .plan_entries
                .iter()
                .any(|e| e.plan_id == plan_id && e.activity_id == item.activity_id)
            {
                return Err(DomainError::Conflict(format!(
                    "Activity {} is already in the plan",
                    item.activity_id
                )));
            }

            let entry = PlanEntry {
                plan_id,
                activity_id: item.activity_id,
                success_count: 0,
                is_chosen: item.is_chosen,
            };
            added.extend(inner.planned(&entry));
            inner.plan_entries.push(entry);
        }

        Ok(added)
    }

    async fn set_chosen(
        &self,
        plan_id: Uuid,
        activity_id: i32,
        is_chosen: bool,
    ) -> Result<bool, DomainError> {
        let mut inner = self.inner.lock().await;
        match inner
            .plan_entries
            .iter_mut()
            .find(|e| e.plan_id == plan_id && e.activity_id == activity_id)
        {
            Some(entry) => {
                entry.is_chosen = is_chosen;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear_activities(&self, plan_id: Uuid) -> Result<u64, DomainError> {
        let mut inner = self.inner.lock().await;
        let before = inner.plan_entries.len();
        inner.plan_entries.retain(|e| e.plan_id != plan_id);
        Ok((before - inner.plan_entries.len()) as u64)
    }

    async fn list_planned(
        &self,
        plan_id: Uuid,
        chosen_only: bool,
    ) -> Result<Vec<PlannedActivity>, DomainError> {
        let inner = self.inner.lock().await;
        let mut planned: Vec<PlannedActivity> = inner
            .plan_entries
            .iter()
            .filter(|e| e.plan_id == plan_id && (!chosen_only || e.is_chosen))
            .filter_map(|e| inner.planned(e))
            .collect();
        planned.sort_by_key(|p| p.activity.id);
        Ok(planned)
    }
}
