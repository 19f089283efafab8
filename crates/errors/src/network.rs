//! Network-related error types
//!
//! Every variant here is a dataset fetch failure: the request never completed,
//! the server answered with a non-success status, or the body was not the
//! expected JSON array.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum NetworkError {
    #[error("connection timeout to {url}")]
    Timeout { url: String },

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("invalid response body: {message}")]
    InvalidBody { message: String },

    #[error("rate limited: retry after {seconds} seconds")]
    RateLimited { seconds: u64 },
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Timeout { .. } | Self::ConnectionRefused(_) | Self::RequestFailed(_) => {
                Some("Please check your internet connection and try again.")
            }
            Self::InvalidUrl(_) => Some("Fix the `network.endpoint` setting or ZYNTIQ_ENDPOINT."),
            Self::HttpError { .. } | Self::InvalidBody { .. } => {
                Some("The verification service is unavailable; try again later.")
            }
            Self::RateLimited { .. } => Some("Wait before retrying the search."),
        }
    }

    fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidUrl(_))
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Timeout { .. } => "network.timeout",
            Self::RequestFailed(_) => "network.request_failed",
            Self::ConnectionRefused(_) => "network.connection_refused",
            Self::InvalidUrl(_) => "network.invalid_url",
            Self::HttpError { .. } => "network.http_error",
            Self::InvalidBody { .. } => "network.invalid_body",
            Self::RateLimited { .. } => "network.rate_limited",
        })
    }
}
