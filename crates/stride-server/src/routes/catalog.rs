//! Catalog Routes - Lifestyle categories, activities and lifestyle selection

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::{domain_error, ApiError};
use crate::models::{
    ActivityListQuery, ActivityResponse, DeletedResponse, LifestyleResponse,
    UserLifestylesRequest,
};
use crate::AppState;

/// List lifestyle categories
#[utoipa::path(
    get,
    path = "/stride/lifestyles",
    responses(
        (status = 200, description = "All lifestyle categories", body = Vec<LifestyleResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn list_lifestyles(
    State(state): State<AppState>,
) -> Result<Json<Vec<LifestyleResponse>>, ApiError> {
    let categories = state
        .catalog_service
        .list_lifestyles()
        .await
        .map_err(domain_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// List activities, optionally filtered by lifestyle category
#[utoipa::path(
    get,
    path = "/stride/activities",
    params(
        ("lifestyle_id" = Option<String>, Query, description = "Comma separated category ids")
    ),
    responses(
        (status = 200, description = "Activities", body = Vec<ActivityResponse>),
        (status = 400, description = "Malformed category filter"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ActivityListQuery>,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let lifestyle_ids = query
        .lifestyle_ids()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let activities = state
        .catalog_service
        .list_activities(lifestyle_ids)
        .await
        .map_err(domain_error)?;

    Ok(Json(activities.into_iter().map(Into::into).collect()))
}

/// Get activity by ID
#[utoipa::path(
    get,
    path = "/stride/activities/{id}",
    params(
        ("id" = i32, Path, description = "Activity ID")
    ),
    responses(
        (status = 200, description = "Activity found", body = ActivityResponse),
        (status = 404, description = "Activity not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let activity = state
        .catalog_service
        .get_activity(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(activity.into()))
}

/// List a user's lifestyle selection
#[utoipa::path(
    get,
    path = "/stride/users/{id}/lifestyles",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Selected categories", body = Vec<LifestyleResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn list_user_lifestyles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LifestyleResponse>>, ApiError> {
    let categories = state
        .catalog_service
        .user_lifestyles(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Add categories to a user's lifestyle selection
#[utoipa::path(
    post,
    path = "/stride/users/{id}/lifestyles",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UserLifestylesRequest,
    responses(
        (status = 200, description = "Selection after the insert", body = Vec<LifestyleResponse>),
        (status = 400, description = "No categories given"),
        (status = 404, description = "User or category not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn add_user_lifestyles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserLifestylesRequest>,
) -> Result<Json<Vec<LifestyleResponse>>, ApiError> {
    let categories = state
        .catalog_service
        .add_user_lifestyles(id, payload.lifestyle_ids)
        .await
        .map_err(domain_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Remove a user's whole lifestyle selection
#[utoipa::path(
    delete,
    path = "/stride/users/{id}/lifestyles",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Selection removed", body = DeletedResponse),
        (status = 404, description = "Nothing selected"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn clear_user_lifestyles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let removed = state
        .catalog_service
        .clear_user_lifestyles(id)
        .await
        .map_err(domain_error)?;

    Ok(Json(DeletedResponse { removed }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stride/lifestyles", get(list_lifestyles))
        .route("/stride/activities", get(list_activities))
        .route("/stride/activities/:id", get(get_activity))
        .route(
            "/stride/users/:id/lifestyles",
            get(list_user_lifestyles)
                .post(add_user_lifestyles)
                .delete(clear_user_lifestyles),
        )
}
