//! Dashboard DTOs - Progress overview for a user

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{PlannedActivityResponse, ProgressResponse};

/// Dashboard response - profile, progression and today's chosen activities
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub user: DashboardUserInfo,
    pub progress: ProgressResponse,
    pub chosen_activities: Vec<PlannedActivityResponse>,
    pub chosen_count: usize,
}

/// Basic user information for dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardUserInfo {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
