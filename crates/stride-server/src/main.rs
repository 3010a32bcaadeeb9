use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;

use adapters::{PgActivityRepository, PgPlanRepository, PgProgressRepository};
use application::{CatalogService, PlanService, ProgressService};
use config::ServerConfig;

/// Type aliases for application services with concrete repository implementations
pub type AppProgressService = ProgressService<PgProgressRepository, PgActivityRepository>;
pub type AppCatalogService = CatalogService<PgActivityRepository>;
pub type AppPlanService = PlanService<PgPlanRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub progress_service: Arc<AppProgressService>,
    pub catalog_service: Arc<AppCatalogService>,
    pub plan_service: Arc<AppPlanService>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Stride API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Assemble every route with its layers
fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::progress::router())
        .merge(routes::catalog::router())
        .merge(routes::plan::router())
        .merge(routes::dashboard::router())
        .layer(middleware::from_fn(auth::auth_middleware));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("Stride API initializing...");

    let config = ServerConfig::from_lookup(|key| secrets.get(key))
        .context("Invalid server configuration")?;

    match config.api_key.clone() {
        Some(api_key) => {
            auth::init_api_key(api_key);
            tracing::info!("API key authentication enabled");
        }
        None => tracing::warn!("No {} set - authentication disabled", config::API_KEY),
    }

    tracing::info!(
        utc_offset_seconds = config.progression.time_zone.local_minus_utc(),
        max_commit_attempts = config.progression.max_commit_attempts,
        "Progression settings loaded"
    );

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    // Initialize application services
    let progress_repo = Arc::new(PgProgressRepository::new(pool.clone()));
    let activity_repo = Arc::new(PgActivityRepository::new(pool.clone()));
    let plan_repo = Arc::new(PgPlanRepository::new(pool));

    let state = AppState {
        progress_service: Arc::new(ProgressService::new(
            progress_repo,
            activity_repo.clone(),
            config.progression,
        )),
        catalog_service: Arc::new(CatalogService::new(activity_repo)),
        plan_service: Arc::new(PlanService::new(plan_repo)),
    };

    let router = build_router(state);

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Stride API ready");

    Ok(router.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    /// Requests under test are rejected before any query runs
    fn offline_router() -> Router {
        let pool = PgPool::connect_lazy("postgres://stride@localhost/stride").unwrap();
        let progress_repo = Arc::new(PgProgressRepository::new(pool.clone()));
        let activity_repo = Arc::new(PgActivityRepository::new(pool.clone()));
        let plan_repo = Arc::new(PgPlanRepository::new(pool));

        build_router(AppState {
            progress_service: Arc::new(ProgressService::new(
                progress_repo,
                activity_repo.clone(),
                Default::default(),
            )),
            catalog_service: Arc::new(CatalogService::new(activity_repo)),
            plan_service: Arc::new(PlanService::new(plan_repo)),
        })
    }

    async fn status_of(request: Request<Body>) -> StatusCode {
        offline_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        assert_eq!(status_of(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_malformed_user_id() {
        let request = Request::builder()
            .uri("/stride/users/not-a-uuid/progress")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_malformed_lifestyle_filter() {
        let request = Request::builder()
            .uri("/stride/activities?lifestyle_id=1,yoga")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_stress() {
        let request = Request::builder()
            .method(Method::PUT)
            .uri(format!("/stride/users/{}/stress", uuid::Uuid::new_v4()))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"stress_level": 11}"#))
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::BAD_REQUEST);
    }
}
