//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>, I: std::fmt::Display>(entity_type: T, id: I) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }
}

/// Errors raised by the progression engine.
///
/// The engine never partially applies a transition, so receiving one of these
/// means the input state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("Invalid completion event: XP reward must be non-negative, got {reward}")]
    InvalidEvent { reward: i64 },
}

impl From<ProgressionError> for DomainError {
    fn from(err: ProgressionError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("Activity", 42);
        assert_eq!(err.to_string(), "Entity not found: Activity with id 42");
    }

    #[test]
    fn test_invalid_event_maps_to_validation() {
        let err: DomainError = ProgressionError::InvalidEvent { reward: -1 }.into();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("-1")));
    }
}
