use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::gateway::ApiEndpoint;
use crate::normalizer::timestamp::deserialize_optional_timestamp;

/// One entry of the recommendations feed.
///
/// `id` is the identity key: two items with the same id are the same video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoItem {
    #[serde(rename = "video_id")]
    pub id: i64,
    pub title: String,
    #[serde(rename = "preview_image")]
    pub preview_image_url: Option<Url>,
    #[serde(rename = "post_image")]
    pub post_image_url: Option<Url>,
    pub channel_id: i64,
    pub channel_name: String,
    #[serde(rename = "channel_avatar")]
    pub channel_avatar_url: Option<Url>,
    #[serde(rename = "numbers_views")]
    pub view_count: u64,
    #[serde(rename = "duration_sec")]
    pub duration_seconds: u64,
    #[serde(rename = "free")]
    pub is_free: bool,
    #[serde(rename = "vertical")]
    pub is_vertical: bool,
    #[serde(
        rename = "date_publication",
        default,
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub published_at: Option<DateTime<Utc>>,
    pub has_access: bool,
    pub content_type: String,
}

impl VideoItem {
    /// Playable HLS playlist for this video. Derived from the id alone.
    pub fn stream_url(&self, endpoint: &ApiEndpoint) -> Url {
        endpoint.stream_url(self.id)
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// `m:ss`, or `h:mm:ss` for anything an hour or longer.
    pub fn display_duration(&self) -> String {
        let secs = self.duration_seconds;
        if secs >= 3600 {
            format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        } else {
            format!("{}:{:02}", secs / 60, secs % 60)
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A minimal item for state and controller tests.
    pub fn video(id: i64) -> VideoItem {
        VideoItem {
            id,
            title: format!("Video {}", id),
            preview_image_url: None,
            post_image_url: None,
            channel_id: 1,
            channel_name: "Channel".into(),
            channel_avatar_url: None,
            view_count: 0,
            duration_seconds: 30,
            is_free: true,
            is_vertical: true,
            published_at: None,
            has_access: true,
            content_type: "shorts".into(),
        }
    }
}
