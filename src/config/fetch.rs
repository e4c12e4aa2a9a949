use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::Error;
use crate::Result;

/// Where the watched page lives and how it is requested.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Absolute http(s) URL of the page whose scripts are watched
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request completion timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validates fetch configuration
    /// # Errors
    /// Returns `Error::InvalidConfig` when:
    /// - The endpoint is not an absolute URL
    /// - The endpoint scheme is neither http nor https
    /// - The request timeout is zero
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| Error::InvalidConfig(format!("endpoint {} is not a valid URL: {}", self.endpoint, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "endpoint scheme {} is not supported, expected http or https",
                url.scheme()
            )));
        }

        if self.request_timeout_ms == 0 {
            return Err(Error::InvalidConfig("request_timeout_ms must be greater than 0".into()));
        }

        Ok(())
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080/".to_string()
}
fn default_request_timeout_ms() -> u64 {
    5000
}
fn default_user_agent() -> String {
    format!("page-watchdog/{}", env!("CARGO_PKG_VERSION"))
}
