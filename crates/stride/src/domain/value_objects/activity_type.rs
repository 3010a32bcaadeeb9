//! ActivityType - Where an activity takes place

use serde::{Deserialize, Serialize};

/// Activity setting classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Indoor,
    Outdoor,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Indoor => "INDOOR",
            ActivityType::Outdoor => "OUTDOOR",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INDOOR" => Ok(ActivityType::Indoor),
            "OUTDOOR" => Ok(ActivityType::Outdoor),
            _ => Err(format!("Unknown activity type: {}", s)),
        }
    }
}
