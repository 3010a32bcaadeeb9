//! PostgreSQL Repository Implementations

mod activity_repository;
mod plan_repository;
mod progress_repository;

pub use activity_repository::PgActivityRepository;
pub use plan_repository::PgPlanRepository;
pub use progress_repository::PgProgressRepository;

use stride::DomainError;

/// Map sqlx errors onto domain errors, keeping constraint violations distinguishable
pub(crate) fn map_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return DomainError::Conflict(db.message().to_string());
        }
        if db.is_foreign_key_violation() {
            return DomainError::NotFound {
                entity_type: "Referenced row".to_string(),
                id: db.constraint().unwrap_or("unknown").to_string(),
            };
        }
    }
    DomainError::Repository(err.to_string())
}
