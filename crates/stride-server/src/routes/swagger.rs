//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    // Catalog models
    ActivityResponse,
    // Plan models
    AddPlanActivitiesRequest,
    // Progress models
    CompleteActivityRequest,
    CompletionRecordResponse,
    CompletionResponse,
    // Dashboard models
    DashboardResponse,
    DashboardUserInfo,
    DeletedResponse,
    LifestyleResponse,
    PlanActivityItem,
    PlanResponse,
    PlannedActivityResponse,
    ProgressResponse,
    RegisterUserRequest,
    SetChosenRequest,
    SetStressRequest,
    UserLifestylesRequest,
    UserProgressResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Progress endpoints
        super::progress::register_user,
        super::progress::get_progress,
        super::progress::complete_activity,
        super::progress::start_session,
        super::progress::set_stress,
        super::progress::list_completions,
        // Catalog endpoints
        super::catalog::list_lifestyles,
        super::catalog::list_activities,
        super::catalog::get_activity,
        super::catalog::list_user_lifestyles,
        super::catalog::add_user_lifestyles,
        super::catalog::clear_user_lifestyles,
        // Plan endpoints
        super::plan::create_plan,
        super::plan::list_plan_activities,
        super::plan::add_plan_activities,
        super::plan::clear_plan_activities,
        super::plan::set_chosen,
        // Dashboard endpoints
        super::dashboard::get_dashboard,
    ),
    info(
        title = "Stride API",
        version = "0.1.0",
        description = "Habit progression API\n\nActivities earn XP, levels grow every 100 XP, daily completions keep the day streak alive and every 100 levels eases the stress level.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Progress", description = "Progress - XP, levels, day streak and stress"),
        (name = "Catalog", description = "Catalog - Lifestyle categories and activities"),
        (name = "Plan", description = "Plan - Activities picked by a user"),
        (name = "Dashboard", description = "Dashboard - Progress overview"),
    ),
    components(
        schemas(
            // Progress
            RegisterUserRequest,
            CompleteActivityRequest,
            SetStressRequest,
            ProgressResponse,
            UserProgressResponse,
            CompletionResponse,
            CompletionRecordResponse,
            // Catalog
            ActivityResponse,
            LifestyleResponse,
            UserLifestylesRequest,
            DeletedResponse,
            // Plan
            PlanResponse,
            PlannedActivityResponse,
            PlanActivityItem,
            AddPlanActivitiesRequest,
            SetChosenRequest,
            // Dashboard
            DashboardResponse,
            DashboardUserInfo,
        )
    )
)]
pub struct ApiDoc;
