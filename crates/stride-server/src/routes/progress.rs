//! Progress Routes - XP, levels, day streak and stress
//!
//! HTTP handlers that delegate to ProgressService.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use stride::StressLevel;

use super::{domain_error, ApiError};
use crate::models::{
    CompleteActivityRequest, CompletionHistoryQuery, CompletionRecordResponse, CompletionResponse,
    ProgressResponse, RegisterUserRequest, SetStressRequest, UserProgressResponse,
};
use crate::AppState;

/// Register a user with default progression
#[utoipa::path(
    post,
    path = "/stride/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "User registered", body = UserProgressResponse),
        (status = 400, description = "Blank username"),
        (status = 409, description = "Username already taken"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Progress"
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<Json<UserProgressResponse>, ApiError> {
    let registered = state
        .progress_service
        .register_user(payload.username)
        .await
        .map_err(domain_error)?;

    Ok(Json(registered.into()))
}

/// Get a user's progression state
#[utoipa::path(
    get,
    path = "/stride/users/{id}/progress",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Progression state", body = UserProgressResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Progress"
)]
pub async fn get_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProgressResponse>, ApiError> {
    let found = state
        .progress_service
        .get_progress(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(found.into()))
}

/// Complete an activity and apply its reward
#[utoipa::path(
    post,
    path = "/stride/users/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = CompleteActivityRequest,
    responses(
        (status = 200, description = "Completion applied or replayed", body = CompletionResponse),
        (status = 400, description = "Invalid completion event"),
        (status = 404, description = "User or activity not found"),
        (status = 409, description = "Progress kept changing concurrently"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Progress"
)]
pub async fn complete_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CompleteActivityRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let report = state
        .progress_service
        .complete_activity(id, payload.activity_id, payload.idempotency_key)
        .await
        .map_err(domain_error)?;

    Ok(Json(report.into()))
}

/// Session-start check: break a stale streak and refresh today's flag
#[utoipa::path(
    post,
    path = "/stride/users/{id}/session",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Progression after the check", body = ProgressResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Progress kept changing concurrently"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Progress"
)]
pub async fn start_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let progress = state
        .progress_service
        .start_session(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(progress.into()))
}

/// Record the stress baseline
#[utoipa::path(
    put,
    path = "/stride/users/{id}/stress",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = SetStressRequest,
    responses(
        (status = 200, description = "Stress baseline recorded", body = ProgressResponse),
        (status = 400, description = "Stress level out of range"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Progress"
)]
pub async fn set_stress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStressRequest>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let stress = StressLevel::try_from(payload.stress_level).map_err(domain_error)?;
    let progress = state
        .progress_service
        .set_stress_baseline(id, stress)
        .await
        .map_err(domain_error)?;

    Ok(Json(progress.into()))
}

/// Completion history, most recent first
#[utoipa::path(
    get,
    path = "/stride/users/{id}/completions",
    params(
        ("id" = Uuid, Path, description = "User ID"),
        ("limit" = Option<i64>, Query, description = "Max entries (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Completion log", body = Vec<CompletionRecordResponse>),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Progress"
)]
pub async fn list_completions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CompletionHistoryQuery>,
) -> Result<Json<Vec<CompletionRecordResponse>>, ApiError> {
    let records = state
        .progress_service
        .completion_history(id, query.limit)
        .await
        .map_err(domain_error)?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stride/users", post(register_user))
        .route("/stride/users/:id/progress", get(get_progress))
        .route("/stride/users/:id/complete", post(complete_activity))
        .route("/stride/users/:id/session", post(start_session))
        .route("/stride/users/:id/stress", put(set_stress))
        .route("/stride/users/:id/completions", get(list_completions))
}
