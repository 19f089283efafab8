#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Dataset fetching for zyntiq
//!
//! One GET against a fixed read endpoint that answers with a JSON array of
//! membership records. The fetcher never caches; the caller decides what to
//! keep.

mod client;

pub use client::{NetClient, NetConfig};

use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;
use zyntiq_errors::{Error, NetworkError};
use zyntiq_events::{AppEvent, EventEmitter, EventSender, FailureContext, FetchEvent};
use zyntiq_types::Dataset;

/// Anything that can produce the full record collection
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Retrieve the full dataset
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` when the request fails, the status is not
    /// successful or the body is not a JSON array of records.
    async fn fetch(&self) -> Result<Dataset, Error>;
}

/// Fetch and parse the dataset at `url`, reporting progress as events
///
/// # Errors
///
/// Returns an error if the HTTP request fails, the server returns an error
/// status, or the body is not a JSON array of records.
pub async fn fetch_dataset(
    client: &NetClient,
    url: &str,
    tx: Option<&EventSender>,
) -> Result<Dataset, Error> {
    let tx = tx.cloned();
    tx.emit(AppEvent::Fetch(FetchEvent::Started {
        url: url.to_string(),
    }));
    let started = Instant::now();

    match fetch_inner(client, url).await {
        Ok(dataset) => {
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            debug!(url, records = dataset.len(), elapsed_ms, "dataset fetched");
            tx.emit(AppEvent::Fetch(FetchEvent::Completed {
                url: url.to_string(),
                records: dataset.len(),
                elapsed_ms,
            }));
            Ok(dataset)
        }
        Err(e) => {
            warn!(url, error = %e, "dataset fetch failed");
            tx.emit(AppEvent::Fetch(FetchEvent::Failed {
                url: url.to_string(),
                failure: FailureContext::from_error(&e),
            }));
            Err(e)
        }
    }
}

async fn fetch_inner(client: &NetClient, url: &str) -> Result<Dataset, Error> {
    let response = client.get(url).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(NetworkError::HttpError {
            status: status.as_u16(),
            message: status.to_string(),
        }
        .into());
    }

    let body = response
        .text()
        .await
        .map_err(|e| NetworkError::RequestFailed(e.to_string()))?;

    Dataset::from_json(&body)
}

/// Parse and validate a URL
///
/// # Errors
///
/// Returns an error if the URL string is malformed or not http(s).
pub fn parse_url(url: &str) -> Result<Url, Error> {
    let parsed = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(NetworkError::InvalidUrl(format!("unsupported scheme: {other}")).into()),
    }
}

/// The remote read endpoint
#[derive(Clone)]
pub struct HttpDatasetSource {
    client: NetClient,
    endpoint: Url,
    tx: Option<EventSender>,
}

impl HttpDatasetSource {
    /// Create a source for a fixed endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not a valid http(s) URL.
    pub fn new(client: NetClient, endpoint: &str) -> Result<Self, Error> {
        Ok(Self {
            client,
            endpoint: parse_url(endpoint)?,
            tx: None,
        })
    }

    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    async fn fetch(&self) -> Result<Dataset, Error> {
        fetch_dataset(&self.client, self.endpoint.as_str(), self.tx.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://sheetdb.io/api/v1/h7tx1qdz2buz1").is_ok());
        assert!(parse_url("not a url").is_err());
        assert!(parse_url("ftp://example.com/data").is_err());
    }

    #[test]
    fn test_source_rejects_bad_endpoint() {
        let client = NetClient::with_defaults().unwrap();
        assert!(HttpDatasetSource::new(client, "::nope").is_err());
    }
}
