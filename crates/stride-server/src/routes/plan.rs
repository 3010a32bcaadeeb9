//! Plan Routes - The activities a user picked

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use super::{domain_error, ApiError};
use crate::models::{
    AddPlanActivitiesRequest, DeletedResponse, PlanActivitiesQuery, PlanResponse,
    PlannedActivityResponse, SetChosenRequest,
};
use crate::AppState;

/// Create the user's plan (returns the existing one if present)
#[utoipa::path(
    post,
    path = "/stride/users/{id}/plan",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Activity plan", body = PlanResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Plan"
)]
pub async fn create_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanResponse>, ApiError> {
    let plan = state
        .plan_service
        .create_plan(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(plan.into()))
}

/// List plan activities
#[utoipa::path(
    get,
    path = "/stride/users/{id}/plan/activities",
    params(
        ("id" = Uuid, Path, description = "User ID"),
        ("chosen_only" = Option<bool>, Query, description = "Only chosen activities")
    ),
    responses(
        (status = 200, description = "Plan activities", body = Vec<PlannedActivityResponse>),
        (status = 404, description = "Plan not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Plan"
)]
pub async fn list_plan_activities(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PlanActivitiesQuery>,
) -> Result<Json<Vec<PlannedActivityResponse>>, ApiError> {
    let planned = state
        .plan_service
        .list_activities(id, query.chosen_only)
        .await
        .map_err(domain_error)?;

    Ok(Json(planned.into_iter().map(Into::into).collect()))
}

/// Add activities to the plan
#[utoipa::path(
    post,
    path = "/stride/users/{id}/plan/activities",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = AddPlanActivitiesRequest,
    responses(
        (status = 200, description = "Added activities", body = Vec<PlannedActivityResponse>),
        (status = 400, description = "No activities given"),
        (status = 404, description = "Plan or activity not found"),
        (status = 409, description = "Activity already in plan"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Plan"
)]
pub async fn add_plan_activities(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddPlanActivitiesRequest>,
) -> Result<Json<Vec<PlannedActivityResponse>>, ApiError> {
    let items = payload.activities.into_iter().map(Into::into).collect();
    let added = state
        .plan_service
        .add_activities(id, items)
        .await
        .map_err(domain_error)?;

    Ok(Json(added.into_iter().map(Into::into).collect()))
}

/// Remove every activity from the plan
#[utoipa::path(
    delete,
    path = "/stride/users/{id}/plan/activities",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Plan emptied", body = DeletedResponse),
        (status = 404, description = "Plan not found or already empty"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Plan"
)]
pub async fn clear_plan_activities(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let removed = state
        .plan_service
        .clear_activities(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(DeletedResponse { removed }))
}

/// Choose or unchoose one plan activity
#[utoipa::path(
    put,
    path = "/stride/users/{id}/plan/activities/{activity_id}",
    params(
        ("id" = Uuid, Path, description = "User ID"),
        ("activity_id" = i32, Path, description = "Activity ID")
    ),
    request_body = SetChosenRequest,
    responses(
        (status = 200, description = "Choice updated"),
        (status = 404, description = "Plan or activity not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Plan"
)]
pub async fn set_chosen(
    State(state): State<AppState>,
    Path((id, activity_id)): Path<(Uuid, i32)>,
    Json(payload): Json<SetChosenRequest>,
) -> Result<(), ApiError> {
    state
        .plan_service
        .set_chosen(id, activity_id, payload.is_chosen)
        .await
        .map_err(domain_error)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stride/users/:id/plan", post(create_plan))
        .route(
            "/stride/users/:id/plan/activities",
            get(list_plan_activities)
                .post(add_plan_activities)
                .delete(clear_plan_activities),
        )
        .route(
            "/stride/users/:id/plan/activities/:activity_id",
            put(set_chosen),
        )
}
