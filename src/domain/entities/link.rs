//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counter.
///
/// `owner_id` references [`super::User::id`], so a link stays reachable by
/// its owner across token renewals.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: String,
    pub original_url: String,
    pub title: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub owner_id: i64,
}

impl Link {
    /// Returns true if the link belongs to the given user.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// Input data for creating a new link. Clicks always start at zero.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: String,
    pub original_url: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub owner_id: i64,
}

impl NewLink {
    pub fn into_link(self) -> Link {
        Link {
            id: self.id,
            original_url: self.original_url,
            title: self.title,
            clicks: 0,
            created_at: self.created_at,
            owner_id: self.owner_id,
        }
    }
}

/// Partial update for an existing link.
///
/// `None` and blank strings leave the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub original_url: Option<String>,
    pub title: Option<String>,
}

impl LinkPatch {
    /// Merges the patch over `link`, returning the updated values.
    pub fn apply(&self, link: &Link) -> (String, String) {
        let pick = |new: &Option<String>, current: &str| {
            new.as_deref()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(current)
                .to_string()
        };

        (
            pick(&self.original_url, &link.original_url),
            pick(&self.title, &link.title),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_link() -> Link {
        NewLink {
            id: "abc12345".to_string(),
            original_url: "https://example.com".to_string(),
            title: "Example".to_string(),
            created_at: Utc::now(),
            owner_id: 7,
        }
        .into_link()
    }

    #[test]
    fn test_new_link_starts_with_zero_clicks() {
        let link = sample_link();
        assert_eq!(link.clicks, 0);
        assert_eq!(link.owner_id, 7);
    }

    #[test]
    fn test_is_owned_by() {
        let link = sample_link();
        assert!(link.is_owned_by(7));
        assert!(!link.is_owned_by(8));
    }

    #[test]
    fn test_patch_overwrites_provided_fields() {
        let patch = LinkPatch {
            original_url: Some("https://rust-lang.org".to_string()),
            title: Some("Rust".to_string()),
        };

        let (url, title) = patch.apply(&sample_link());
        assert_eq!(url, "https://rust-lang.org");
        assert_eq!(title, "Rust");
    }

    #[test]
    fn test_patch_ignores_omitted_and_empty_fields() {
        let patch = LinkPatch {
            original_url: Some(String::new()),
            title: None,
        };

        let (url, title) = patch.apply(&sample_link());
        assert_eq!(url, "https://example.com");
        assert_eq!(title, "Example");
    }

    #[test]
    fn test_patch_ignores_whitespace_only_fields() {
        let patch = LinkPatch {
            original_url: Some("   ".to_string()),
            title: Some("\t".to_string()),
        };

        let (url, title) = patch.apply(&sample_link());
        assert_eq!(url, "https://example.com");
        assert_eq!(title, "Example");
    }
}
