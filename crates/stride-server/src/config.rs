//! Server configuration
//!
//! Typed view over the deployment secrets.
//!
//! - `STRIDE_API_KEY`: bearer token required by protected routes (unset = auth disabled)
//! - `STRIDE_UTC_OFFSET_MINUTES`: zone used for calendar-day streak rules (default 0 = UTC)
//! - `STRIDE_MAX_COMMIT_ATTEMPTS`: optimistic-commit retries per request (default 3)

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

pub const API_KEY: &str = "STRIDE_API_KEY";
pub const UTC_OFFSET_MINUTES: &str = "STRIDE_UTC_OFFSET_MINUTES";
pub const MAX_COMMIT_ATTEMPTS: &str = "STRIDE_MAX_COMMIT_ATTEMPTS";

const DEFAULT_MAX_COMMIT_ATTEMPTS: u32 = 3;
const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be an integer, got {value:?}")]
    NotANumber { key: &'static str, value: String },

    #[error("STRIDE_UTC_OFFSET_MINUTES must be within ±1439 minutes, got {0}")]
    OffsetOutOfRange(i32),

    #[error("STRIDE_MAX_COMMIT_ATTEMPTS must be at least 1")]
    NoCommitAttempts,
}

/// Progression settings handed to the application layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionConfig {
    /// Zone used for every calendar-date comparison
    pub time_zone: FixedOffset,
    /// How often a completion is recomputed after losing a version race
    pub max_commit_attempts: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            time_zone: utc(),
            max_commit_attempts: DEFAULT_MAX_COMMIT_ATTEMPTS,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub api_key: Option<String>,
    pub progression: ProgressionConfig,
}

impl ServerConfig {
    /// Build the config from a key lookup (shuttle `SecretStore::get` in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY).filter(|k| !k.trim().is_empty());

        let time_zone = match lookup(UTC_OFFSET_MINUTES) {
            Some(raw) => {
                let minutes: i32 = parse_number(UTC_OFFSET_MINUTES, &raw)?;
                if minutes.abs() > MAX_OFFSET_MINUTES {
                    return Err(ConfigError::OffsetOutOfRange(minutes));
                }
                FixedOffset::east_opt(minutes * 60).ok_or(ConfigError::OffsetOutOfRange(minutes))?
            }
            None => utc(),
        };

        let max_commit_attempts = match lookup(MAX_COMMIT_ATTEMPTS) {
            Some(raw) => match parse_number::<u32>(MAX_COMMIT_ATTEMPTS, &raw)? {
                0 => return Err(ConfigError::NoCommitAttempts),
                n => n,
            },
            None => DEFAULT_MAX_COMMIT_ATTEMPTS,
        };

        Ok(Self {
            api_key,
            progression: ProgressionConfig {
                time_zone,
                max_commit_attempts,
            },
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: raw.to_string(),
    })
}

fn utc() -> FixedOffset {
    Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.progression, ProgressionConfig::default());
        assert_eq!(config.progression.time_zone.local_minus_utc(), 0);
        assert_eq!(config.progression.max_commit_attempts, 3);
    }

    #[test]
    fn test_reads_all_keys() {
        let config = config_from(&[
            (API_KEY, "secret"),
            (UTC_OFFSET_MINUTES, "420"),
            (MAX_COMMIT_ATTEMPTS, "5"),
        ])
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.progression.time_zone.local_minus_utc(), 420 * 60);
        assert_eq!(config.progression.max_commit_attempts, 5);
    }

    #[test]
    fn test_blank_api_key_disables_auth() {
        let config = config_from(&[(API_KEY, "  ")]).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_negative_offset() {
        let config = config_from(&[(UTC_OFFSET_MINUTES, "-300")]).unwrap();
        assert_eq!(config.progression.time_zone.local_minus_utc(), -300 * 60);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            config_from(&[(UTC_OFFSET_MINUTES, "1440")]).unwrap_err(),
            ConfigError::OffsetOutOfRange(1440)
        );
        assert!(matches!(
            config_from(&[(UTC_OFFSET_MINUTES, "+7h")]).unwrap_err(),
            ConfigError::NotANumber { .. }
        ));
        assert_eq!(
            config_from(&[(MAX_COMMIT_ATTEMPTS, "0")]).unwrap_err(),
            ConfigError::NoCommitAttempts
        );
    }
}
