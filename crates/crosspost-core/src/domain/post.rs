use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::platform::PlatformName;

/// Delivery status of a post.
///
/// `Error` is reserved for a real delivery failure path; nothing in the
/// current engine produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Error,
}

/// Attached media, opaque to the store beyond its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Data URL for local preview.
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Post entity - a unit of content targeted at one or more platforms.
///
/// Persisted snapshots use camelCase keys with `scheduledAt`/`publishedAt`
/// as ISO-8601 strings; those are the exact keys the decoder turns back
/// into timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub platforms: Vec<PlatformName>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaAttachment>,
    pub status: PostStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A post as submitted by the composer, before the store assigns an
/// identity and resolves its status.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub content: String,
    pub platforms: Vec<PlatformName>,
    pub media: Option<MediaAttachment>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Resolve a draft into a stored post: a delivery time means Scheduled,
    /// none means Published as of `now`.
    ///
    /// Content and platforms are taken as-is; validating them is the
    /// composer's responsibility.
    pub fn compose(draft: NewPost, now: DateTime<Utc>) -> Self {
        let scheduled = draft.scheduled_at.is_some();
        Self {
            id: Uuid::new_v4(),
            platforms: draft.platforms,
            content: draft.content,
            media: draft.media,
            status: if scheduled {
                PostStatus::Scheduled
            } else {
                PostStatus::Published
            },
            scheduled_at: draft.scheduled_at,
            published_at: if scheduled { None } else { Some(now) },
            error: None,
        }
    }

    /// Whether the promotion sweep should publish this post at `now`.
    /// Only Scheduled posts ever qualify, so a published post cannot be
    /// re-promoted.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == PostStatus::Scheduled
            && self.scheduled_at.is_some_and(|at| now >= at)
    }

    /// Comma-separated platform names, for user-facing messages.
    pub fn platform_list(&self) -> String {
        self.platforms
            .iter()
            .map(PlatformName::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft(scheduled_at: Option<DateTime<Utc>>) -> NewPost {
        NewPost {
            content: "hello world".to_owned(),
            platforms: vec![PlatformName::Facebook, PlatformName::X],
            media: None,
            scheduled_at,
        }
    }

    #[test]
    fn compose_without_schedule_publishes_immediately() {
        let now = Utc::now();
        let post = Post::compose(draft(None), now);

        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.published_at, Some(now));
        assert_eq!(post.scheduled_at, None);
    }

    #[test]
    fn compose_with_schedule_defers_publication() {
        let now = Utc::now();
        let at = now + Duration::hours(1);
        let post = Post::compose(draft(Some(at)), now);

        assert_eq!(post.status, PostStatus::Scheduled);
        assert_eq!(post.scheduled_at, Some(at));
        assert_eq!(post.published_at, None);
    }

    #[test]
    fn due_check_respects_status_and_time() {
        let now = Utc::now();
        let mut post = Post::compose(draft(Some(now - Duration::seconds(1))), now);
        assert!(post.is_due(now));

        post.status = PostStatus::Published;
        assert!(!post.is_due(now));

        let future = Post::compose(draft(Some(now + Duration::hours(1))), now);
        assert!(!future.is_due(now));
    }

    #[test]
    fn wire_format_uses_camel_case_date_keys() {
        let now = Utc::now();
        let mut post = Post::compose(draft(Some(now + Duration::hours(1))), now);
        post.media = Some(MediaAttachment {
            name: "beach.png".to_owned(),
            kind: MediaKind::Image,
            url: "data:image/png;base64,xyz".to_owned(),
        });

        let json = serde_json::to_string(&post).unwrap();
        assert!(json.contains("\"scheduledAt\""));
        assert!(json.contains("\"type\":\"image\""));
        // publishedAt is unset while scheduled and must be omitted
        assert!(!json.contains("publishedAt"));

        let decoded: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, post);
    }

    #[test]
    fn decodes_snapshot_written_by_the_browser_app() {
        let json = r#"{
            "id": "6dbd4f2f-6e57-4f0e-9a04-96d08f95c1ea",
            "platforms": ["Facebook", "LinkedIn"],
            "content": "launch day!",
            "status": "Published",
            "scheduledAt": null,
            "publishedAt": "2024-05-01T10:30:00.000Z"
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.scheduled_at, None);
        assert_eq!(
            post.published_at.unwrap().to_rfc3339(),
            "2024-05-01T10:30:00+00:00"
        );
        assert_eq!(post.platform_list(), "Facebook, LinkedIn");
    }
}
