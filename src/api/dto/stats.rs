//! DTO for per-link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::LinkStats;

/// Response body for `GET /stats/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub id: String,
    pub title: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub short_url: String,
    pub original_url: String,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            id: stats.id,
            title: stats.title,
            clicks: stats.clicks,
            created_at: stats.created_at,
            short_url: stats.short_url,
            original_url: stats.original_url,
        }
    }
}
