#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use reelfeed::app::Result;
use reelfeed::domain::PageResult;
use reelfeed::gateway::{ApiEndpoint, Gateway};
use reelfeed::normalizer::Normalizer;

/// One video in the server's wire shape.
pub fn video_json(id: i64) -> Value {
    json!({
        "video_id": id,
        "title": format!("Clip {}", id),
        "preview_image": format!("https://cdn.example.com/p/{}.jpg", id),
        "channel_id": 1,
        "channel_name": "Channel",
        "numbers_views": id * 10,
        "duration_sec": 20,
        "free": true,
        "vertical": true,
        "date_publication": "2024-06-01T07:00:00.123456",
        "has_access": true,
        "content_type": "shorts"
    })
}

/// A page body as the recommendations endpoint returns it.
pub fn page_json(offset: u32, ids: impl IntoIterator<Item = i64>) -> Value {
    let items: Vec<Value> = ids.into_iter().map(video_json).collect();
    json!({
        "total": 14,
        "offset": offset,
        "limit": 10,
        "count": items.len(),
        "items": items,
    })
}

/// Serves canned page bodies in order, decoded through the real normalizer.
/// Returns an empty page once the script runs out.
pub struct CannedGateway {
    pages: Mutex<VecDeque<Value>>,
    offsets: Mutex<Vec<u32>>,
    normalizer: Normalizer,
}

impl CannedGateway {
    pub fn new(pages: Vec<Value>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            offsets: Mutex::new(Vec::new()),
            normalizer: Normalizer::new(),
        }
    }

    pub fn requested_offsets(&self) -> Vec<u32> {
        self.offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for CannedGateway {
    async fn fetch_recommendations(
        &self,
        offset: u32,
        _limit: u32,
        _category: &str,
    ) -> Result<PageResult> {
        self.offsets.lock().unwrap().push(offset);
        let body = self
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| page_json(offset, []));
        self.normalizer.normalize(body.to_string().as_bytes())
    }

    fn stream_url(&self, video_id: i64) -> Url {
        ApiEndpoint::default().stream_url(video_id)
    }
}
