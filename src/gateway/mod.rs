pub mod endpoint;
pub mod http_gateway;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;
use crate::domain::PageResult;

pub use endpoint::{ApiEndpoint, DEFAULT_BASE_URL, DEFAULT_CATEGORY};
pub use http_gateway::HttpGateway;

/// The video API as the feed controller sees it.
///
/// One call is one round trip: implementations do not retry and hold no
/// state that a call mutates.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_recommendations(
        &self,
        offset: u32,
        limit: u32,
        category: &str,
    ) -> Result<PageResult>;

    fn stream_url(&self, video_id: i64) -> Url;
}
