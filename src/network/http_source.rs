use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::ContentSource;
use crate::utils::time::cache_bust_stamp;
use crate::FetchConfig;
use crate::FetchError;
use crate::Result;
use crate::CACHE_BUST_PARAM;

/// Fetches the watched page over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: Client,
    endpoint: Url,
}

impl HttpContentSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|source| FetchError::InvalidEndpoint {
            url: config.endpoint.clone(),
            source,
        })?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL requested for one fetch. With `disable_cache` every call gets a
    /// distinct `_=<millis>` query pair.
    pub(crate) fn request_url(
        &self,
        disable_cache: bool,
    ) -> Url {
        let mut url = self.endpoint.clone();
        if disable_cache {
            url.query_pairs_mut()
                .append_pair(CACHE_BUST_PARAM, &cache_bust_stamp().to_string());
        }
        url
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_current_document(
        &self,
        disable_cache: bool,
    ) -> Result<String> {
        let url = self.request_url(disable_cache);
        debug!(%url, "fetching page");

        let response = self.client.get(url).send().await.map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            }
            .into());
        }

        let html = response.text().await.map_err(FetchError::Transport)?;
        Ok(html)
    }
}
