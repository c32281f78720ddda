use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use url::Url;

use crate::app::{ReelError, Result};
use crate::config::ApiConfig;
use crate::domain::PageResult;
use crate::gateway::{ApiEndpoint, Gateway};
use crate::normalizer::Normalizer;

pub struct HttpGateway {
    client: Client,
    endpoint: ApiEndpoint,
    normalizer: Normalizer,
}

impl HttpGateway {
    pub fn new(endpoint: ApiEndpoint) -> Result<Self> {
        Self::with_config(endpoint, &ApiConfig::default())
    }

    pub fn with_config(endpoint: ApiEndpoint, config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            normalizer: Normalizer::new(),
        })
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn fetch_recommendations(
        &self,
        offset: u32,
        limit: u32,
        category: &str,
    ) -> Result<PageResult> {
        let url = self.endpoint.recommendations(offset, limit, category);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReelError::BadStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        self.normalizer.normalize(&body)
    }

    fn stream_url(&self, video_id: i64) -> Url {
        self.endpoint.stream_url(video_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_config() {
        let config = ApiConfig {
            timeout_secs: 1,
            user_agent: "reelfeed-test".into(),
            ..ApiConfig::default()
        };
        let gateway = HttpGateway::with_config(ApiEndpoint::default(), &config).unwrap();
        assert_eq!(gateway.endpoint(), &ApiEndpoint::default());
    }

    #[test]
    fn test_stream_url_delegates_to_endpoint() {
        let endpoint = ApiEndpoint::parse("http://localhost:1/").unwrap();
        let gateway = HttpGateway::new(endpoint.clone()).unwrap();
        assert_eq!(gateway.stream_url(3), endpoint.stream_url(3));
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        drop(std_listener);

        std::env::set_var("NO_PROXY", "127.0.0.1");
        let endpoint = ApiEndpoint::parse(&format!("http://{}", addr)).unwrap();
        let gateway = HttpGateway::new(endpoint).unwrap();

        let result = tokio_test::block_on(gateway.fetch_recommendations(0, 10, "shorts"));
        assert!(matches!(result, Err(ReelError::Transport(_))));
    }
}
