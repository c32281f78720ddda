use url::Url;

use crate::app::{ReelError, Result};

pub const DEFAULT_BASE_URL: &str = "https://interesnoitochka.ru";
pub const DEFAULT_CATEGORY: &str = "shorts";

const RECOMMENDATIONS_PATH: &str = "api/v1/videos/recommendations";

/// URL construction for the video API. Pure: nothing here touches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: Url,
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        let base = Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid");
        Self { base }
    }
}

impl ApiEndpoint {
    pub fn new(base: Url) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(ReelError::Config(format!(
                "API base URL cannot carry a path: {}",
                base
            )));
        }
        Ok(Self { base })
    }

    pub fn parse(base: &str) -> Result<Self> {
        Self::new(Url::parse(base)?)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Recommendations query. The date filter and sort are fixed: offset
    /// paging is only stable against a stable server-side order.
    pub fn recommendations(&self, offset: u32, limit: u32, category: &str) -> Url {
        let mut url = self.with_path(RECOMMENDATIONS_PATH);
        url.query_pairs_mut()
            .clear()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string())
            .append_pair("category", category)
            .append_pair("date_filter_type", "created")
            .append_pair("sort_by", "date_created")
            .append_pair("sort_order", "desc");
        url
    }

    /// HLS playlist for a video. Stable per id.
    pub fn stream_url(&self, video_id: i64) -> Url {
        let mut url = self.with_path(&format!(
            "api/v1/videos/video/{}/hls/playlist.m3u8",
            video_id
        ));
        url.set_query(None);
        url
    }

    fn with_path(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let prefix = self.base.path().trim_end_matches('/');
        url.set_path(&format!("{}/{}", prefix, path));
        url.set_fragment(None);
        url
    }
}
