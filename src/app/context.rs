use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::domain::FeedLimits;
use crate::feed::{spawn_feed_controller, FeedHandle};
use crate::gateway::{ApiEndpoint, Gateway, HttpGateway};

pub struct AppContext {
    pub config: Config,
    pub endpoint: ApiEndpoint,
    pub gateway: Arc<dyn Gateway>,
}

impl AppContext {
    /// Build the HTTP stack from configuration. `base_url` overrides
    /// `[api].base_url` when given.
    pub fn new(config: Config, base_url: Option<&str>) -> Result<Self> {
        let endpoint = ApiEndpoint::parse(base_url.unwrap_or(&config.api.base_url))?;
        let gateway: Arc<dyn Gateway> =
            Arc::new(HttpGateway::with_config(endpoint.clone(), &config.api)?);

        Ok(Self {
            config,
            endpoint,
            gateway,
        })
    }

    /// Wire an arbitrary gateway, e.g. a canned one in tests.
    pub fn with_gateway(config: Config, gateway: Arc<dyn Gateway>) -> Result<Self> {
        let endpoint = ApiEndpoint::parse(&config.api.base_url)?;
        Ok(Self {
            config,
            endpoint,
            gateway,
        })
    }

    pub fn feed_limits(&self) -> FeedLimits {
        self.config.feed
    }

    pub fn category(&self) -> &str {
        &self.config.api.category
    }

    /// Start a feed controller against this context's gateway.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_feed(&self) -> FeedHandle {
        spawn_feed_controller(self.gateway.clone(), self.category(), self.feed_limits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ReelError;

    #[test]
    fn test_base_url_override() {
        let ctx = AppContext::new(Config::default(), Some("http://127.0.0.1:8080/")).unwrap();
        assert_eq!(ctx.endpoint.base().as_str(), "http://127.0.0.1:8080/");
        assert_eq!(
            ctx.gateway.stream_url(7).as_str(),
            "http://127.0.0.1:8080/api/v1/videos/video/7/hls/playlist.m3u8"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".into();
        let err = AppContext::new(config, None).err().unwrap();
        assert!(matches!(err, ReelError::InvalidUrl(_)));
    }

    #[test]
    fn test_context_exposes_config() {
        let mut config = Config::default();
        config.api.category = "clips".into();
        config.feed.max_cache_size = 9;

        let ctx = AppContext::new(config, None).unwrap();
        assert_eq!(ctx.category(), "clips");
        assert_eq!(ctx.feed_limits().max_cache_size, 9);
    }
}
