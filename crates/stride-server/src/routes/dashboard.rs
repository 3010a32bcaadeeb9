//! Dashboard Routes - Progress overview for a user

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::{domain_error, ApiError};
use crate::models::{DashboardResponse, DashboardUserInfo, PlannedActivityResponse};
use crate::AppState;

/// Get user dashboard
#[utoipa::path(
    get,
    path = "/stride/users/{id}/dashboard",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let (user, progress) = state
        .progress_service
        .get_progress(id)
        .await
        .map_err(domain_error)?;

    let chosen: Vec<PlannedActivityResponse> = state
        .plan_service
        .chosen_activities(id)
        .await
        .map_err(domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(DashboardResponse {
        user: DashboardUserInfo {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        },
        progress: progress.into(),
        chosen_count: chosen.len(),
        chosen_activities: chosen,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/stride/users/:id/dashboard", get(get_dashboard))
}
