//! StressLevel - Baseline stress score produced by the lifestyle classifier

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Validated stress baseline on a 1..=10 scale.
///
/// Only used at the boundary where an external classifier result is recorded.
/// Inside the progression engine the score is a plain integer that decays
/// towards [`crate::STRESS_FLOOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StressLevel(i64);

impl StressLevel {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for StressLevel {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::Validation(format!(
                "Stress level must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }
}

impl From<StressLevel> for i64 {
    fn from(level: StressLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
