//! Catalog DTOs - Lifestyle categories and activities

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use stride::{Activity, LifestyleCategory};

/// Catalog activity
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityResponse {
    pub id: i32,
    pub name: String,
    /// Suggested duration in minutes
    pub base_time: Option<i32>,
    pub base_xp: Option<i32>,
    /// INDOOR or OUTDOOR
    pub activity_type: Option<String>,
    pub description: Option<String>,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name,
            base_time: activity.base_time,
            base_xp: activity.base_xp,
            activity_type: activity.activity_type.map(|t| t.as_str().to_string()),
            description: activity.description,
        }
    }
}

/// Lifestyle category
#[derive(Debug, Serialize, ToSchema)]
pub struct LifestyleResponse {
    pub id: i32,
    pub name: String,
}

impl From<LifestyleCategory> for LifestyleResponse {
    fn from(category: LifestyleCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

/// Replace-insert the lifestyle selection of a user
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserLifestylesRequest {
    pub lifestyle_ids: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityListQuery {
    /// Comma separated category ids, e.g. `1,2`
    pub lifestyle_id: Option<String>,
}

impl ActivityListQuery {
    /// Parse the category filter; `None` when absent or blank
    pub fn lifestyle_ids(&self) -> Result<Option<Vec<i32>>, String> {
        let Some(raw) = self.lifestyle_id.as_deref().filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };

        raw.split(',')
            .map(|part| {
                part.trim()
                    .parse::<i32>()
                    .map_err(|_| format!("Invalid lifestyle_id '{}'", part.trim()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Number of rows a bulk delete removed
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub removed: u64,
}
