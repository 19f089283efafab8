//! HTTP client wrapper

use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use zyntiq_config::Config;
use zyntiq_errors::{Error, NetworkError};

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Extra attempts after a transport failure; 0 means a single attempt
    pub retry_count: u32,
    pub retry_delay: Duration,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry_count: 0,
            retry_delay: Duration::from_secs(1),
            user_agent: format!("zyntiq/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&Config> for NetConfig {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.timeout(),
            retry_count: config.network.retries,
            retry_delay: Duration::from_secs(config.network.retry_delay),
            ..Self::default()
        }
    }
}

/// HTTP client wrapper with optional retries
#[derive(Clone)]
pub struct NetClient {
    client: Client,
    config: NetConfig,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    /// Execute a GET request
    ///
    /// Only transport failures are retried, and only when `retry_count > 0`.
    /// The response status is left for the caller to judge.
    ///
    /// # Errors
    ///
    /// Returns an error on timeout, connection failure or a rate-limit answer.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        let mut last_error = None;

        for attempt in 0..=self.config.retry_count {
            if attempt > 0 {
                debug!(url, attempt, "retrying request");
                tokio::time::sleep(Self::backoff(self.config.retry_delay, attempt)).await;
            }

            match self.client.get(url).send().await {
                Ok(response) => {
                    if response.status() == StatusCode::TOO_MANY_REQUESTS {
                        if let Some(seconds) = response
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|s| s.parse::<u64>().ok())
                        {
                            return Err(NetworkError::RateLimited { seconds }.into());
                        }
                    }
                    return Ok(response);
                }
                Err(e) => {
                    let retry = Self::should_retry(&e);
                    last_error = Some(e);
                    if !retry {
                        break;
                    }
                }
            }
        }

        Err(match last_error {
            Some(e) if e.is_timeout() => NetworkError::Timeout {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
            },
            Some(e) if e.is_connect() => NetworkError::ConnectionRefused(e.to_string()),
            Some(e) => NetworkError::RequestFailed(e.to_string()),
            None => NetworkError::RequestFailed("no attempt was made".to_string()),
        }
        .into())
    }

    fn should_retry(error: &reqwest::Error) -> bool {
        error.is_timeout() || error.is_connect()
    }

    /// Linear backoff, saturating at `Duration::MAX`
    fn backoff(delay: Duration, attempt: u32) -> Duration {
        delay.checked_mul(attempt).unwrap_or(Duration::MAX)
    }
}
