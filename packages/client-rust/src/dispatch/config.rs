use std::time::Duration;

use url::Url;

use super::retry::RetryPolicy;

/// Default HAAPI backend.
pub const DEFAULT_BASE_URL: &str = "https://haapi.ankama.com/";

/// Client-level configuration: backend location, transport deadlines, and
/// the retry window applied to every dispatch.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Absolute base URL. Must end with `/`; endpoint paths are appended as-is.
    pub base_url: String,
    /// Per-request deadline enforced by the transport.
    pub request_timeout: Duration,
    /// Connection establishment deadline enforced by the transport.
    pub connect_timeout: Duration,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("haapi-client/{}", env!("CARGO_PKG_VERSION")),
            retry: RetryPolicy::default(),
        }
    }
}

/// Rejected configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base url {url:?} must use http or https")]
    UnsupportedScheme { url: String },
    #[error("base url {url:?} must end with '/'")]
    MissingTrailingSlash { url: String },
    #[error("retry window is inverted: min {min:?} > max {max:?}")]
    InvertedRetryWindow { min: Duration, max: Duration },
}

impl ClientConfig {
    /// Check the invariants the dispatcher and URL builder rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a `ConfigError`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                url: self.base_url.clone(),
            });
        }
        if !self.base_url.ends_with('/') {
            return Err(ConfigError::MissingTrailingSlash {
                url: self.base_url.clone(),
            });
        }
        if self.retry.min_interval > self.retry.max_interval {
            return Err(ConfigError::InvertedRetryWindow {
                min: self.retry.min_interval,
                max: self.retry.max_interval,
            });
        }
        Ok(())
    }
}
