//! Stride API Routes
//!
//! - /stride/users - Registration
//! - /stride/users/:id/progress, complete, session, stress, completions - Progression
//! - /stride/users/:id/dashboard - Dashboard
//! - /stride/lifestyles, /stride/activities - Catalog
//! - /stride/users/:id/lifestyles - Lifestyle selection
//! - /stride/users/:id/plan - Activity plan

use axum::http::StatusCode;

use stride::DomainError;

pub mod catalog;
pub mod dashboard;
pub mod plan;
pub mod progress;
pub mod swagger;

/// Error half of every handler result
pub type ApiError = (StatusCode, String);

/// Map a domain error to its HTTP status
pub fn domain_error(err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Repository(_) => {
            tracing::error!("Repository failure: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride::ProgressionError;

    #[test]
    fn test_domain_error_status() {
        assert_eq!(
            domain_error(DomainError::not_found("User", 7)).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            domain_error(DomainError::Validation("bad".into())).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_error(DomainError::Conflict("raced".into())).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            domain_error(DomainError::Repository("down".into())).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_event_is_bad_request() {
        let err: DomainError = ProgressionError::InvalidEvent { reward: -5 }.into();
        let (status, body) = domain_error(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("-5"));
    }
}
