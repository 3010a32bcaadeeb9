//! Stride API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

/// API Client for Stride
pub struct StrideClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct ProgressResponse {
    pub level: i64,
    pub xp: i64,
    pub xp_for_next_level: i64,
    pub day_streak: i64,
    pub stress_level: Option<i64>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub has_succeeded_today: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserProgressResponse {
    pub id: Uuid,
    pub username: String,
    pub progress: ProgressResponse,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub replayed: bool,
    pub xp_gained: i64,
    pub levels_gained: i64,
    pub streak_changed: bool,
    pub stress_decremented: i64,
    pub level: i64,
    pub xp: i64,
    pub xp_for_next_level: i64,
    pub day_streak: i64,
}

#[derive(Debug, Deserialize)]
pub struct ActivityResponse {
    pub id: i32,
    pub name: String,
    pub base_time: Option<i32>,
    pub base_xp: Option<i32>,
    pub activity_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlannedActivityResponse {
    pub activity: ActivityResponse,
    pub success_count: i32,
}

#[derive(Debug, Deserialize)]
pub struct DashboardResponse {
    pub user: DashboardUser,
    pub progress: ProgressResponse,
    pub chosen_activities: Vec<PlannedActivityResponse>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardUser {
    pub username: String,
}

#[derive(Debug, Serialize)]
struct RegisterUserRequest<'a> {
    username: &'a str,
}

#[derive(Debug, Serialize)]
struct CompleteActivityRequest {
    activity_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    idempotency_key: Option<Uuid>,
}

impl StrideClient {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// Authenticate, send, and decode a JSON response
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        };

        let resp = request
            .send()
            .await
            .context("Failed to connect to Stride API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        resp.json().await.context("Failed to parse response")
    }

    pub async fn register(&self, username: &str) -> Result<UserProgressResponse> {
        let request = self
            .client
            .post(self.url("/stride/users"))
            .json(&RegisterUserRequest { username });
        self.send(request).await
    }

    pub async fn get_progress(&self, user_id: Uuid) -> Result<UserProgressResponse> {
        let request = self
            .client
            .get(self.url(&format!("/stride/users/{}/progress", user_id)));
        self.send(request).await
    }

    pub async fn complete(
        &self,
        user_id: Uuid,
        activity_id: i32,
        idempotency_key: Option<Uuid>,
    ) -> Result<CompletionResponse> {
        let request = self
            .client
            .post(self.url(&format!("/stride/users/{}/complete", user_id)))
            .json(&CompleteActivityRequest {
                activity_id,
                idempotency_key,
            });
        self.send(request).await
    }

    pub async fn start_session(&self, user_id: Uuid) -> Result<ProgressResponse> {
        let request = self
            .client
            .post(self.url(&format!("/stride/users/{}/session", user_id)));
        self.send(request).await
    }

    pub async fn list_activities(&self, lifestyle_ids: &[i32]) -> Result<Vec<ActivityResponse>> {
        let mut request = self.client.get(self.url("/stride/activities"));
        if !lifestyle_ids.is_empty() {
            request = request.query(&[("lifestyle_id", join_ids(lifestyle_ids))]);
        }
        self.send(request).await
    }

    pub async fn dashboard(&self, user_id: Uuid) -> Result<DashboardResponse> {
        let request = self
            .client
            .get(self.url(&format!("/stride/users/{}/dashboard", user_id)));
        self.send(request).await
    }
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
