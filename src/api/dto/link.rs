//! DTOs for creating, listing and editing links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Link, LinkPatch};

/// Request body for `POST /shorten`.
///
/// The URL is stored as given; only emptiness is rejected.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub long_url: String,
    pub title: Option<String>,
}

/// Request body for `PATCH /edit/{id}`.
///
/// Absent and empty fields leave the stored value unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLinkRequest {
    pub long_url: Option<String>,
    pub title: Option<String>,
}

impl From<UpdateLinkRequest> for LinkPatch {
    fn from(req: UpdateLinkRequest) -> Self {
        LinkPatch {
            original_url: req.long_url,
            title: req.title,
        }
    }
}

/// A link as returned by `POST /shorten` and `GET /links`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub short_url: String,
    pub id: String,
    pub original_url: String,
    pub title: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub owner_id: i64,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            short_url,
            id: link.id,
            original_url: link.original_url,
            title: link.title,
            clicks: link.clicks,
            created_at: link.created_at,
            owner_id: link.owner_id,
        }
    }
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_response_uses_camel_case() {
        let link = Link {
            id: "abcd1234".to_string(),
            original_url: "https://example.com".to_string(),
            title: "Example".to_string(),
            clicks: 2,
            created_at: Utc::now(),
            owner_id: 7,
        };

        let value = serde_json::to_value(LinkResponse::new(
            link,
            "http://localhost:3000/abcd1234".to_string(),
        ))
        .unwrap();

        assert_eq!(value["shortUrl"], "http://localhost:3000/abcd1234");
        assert_eq!(value["originalUrl"], "https://example.com");
        assert_eq!(value["ownerId"], 7);
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_update_request_into_patch() {
        let req: UpdateLinkRequest =
            serde_json::from_value(json!({ "title": "New title" })).unwrap();
        let patch = LinkPatch::from(req);

        assert!(patch.original_url.is_none());
        assert_eq!(patch.title.as_deref(), Some("New title"));
    }

    #[test]
    fn test_shorten_request_missing_url_is_empty() {
        let req: ShortenRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.long_url.is_empty());
        assert!(req.title.is_none());
    }
}
