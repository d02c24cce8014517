//! Transport to the Alma SRU endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::FetchError;

const SRU_VERSION: &str = "1.2";
const RECORD_SCHEMA: &str = "marcxml";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends an encoded CQL query to a remote search service.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Returns the raw response text for `encoded_query`, which must already be
    /// percent-encoded for use in a URL.
    async fn fetch(&self, encoded_query: &str) -> Result<String, FetchError>;
}

/// Base URL of an SRU service, e.g. `https://host/view/sru/47BIBSYS_NETWORK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SruEndpoint {
    base_url: String,
}

impl SruEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// HTTPS endpoint from a host name and a service path.
    pub fn https(host: &str, path: &str) -> Self {
        Self::new(format!(
            "https://{}/{}",
            host.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// searchRetrieve URL for a single MARCXML record matching `encoded_query`.
    pub fn search_url(&self, encoded_query: &str) -> String {
        format!(
            "{}?version={SRU_VERSION}&operation=searchRetrieve&recordSchema={RECORD_SCHEMA}&maximumRecords=1&query={encoded_query}",
            self.base_url
        )
    }
}

/// [`RecordFetcher`] backed by a `reqwest` client with bounded timeouts.
#[derive(Debug, Clone)]
pub struct HttpRecordFetcher {
    client: reqwest::Client,
    endpoint: SruEndpoint,
}

impl HttpRecordFetcher {
    pub fn new(endpoint: SruEndpoint, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &SruEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl RecordFetcher for HttpRecordFetcher {
    async fn fetch(&self, encoded_query: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let url = self.endpoint.search_url(encoded_query);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(endpoint = %self.endpoint.base_url, error = %e, "SRU request failed");
            FetchError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                endpoint = %self.endpoint.base_url,
                status = status.as_u16(),
                "SRU endpoint returned error status"
            );
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(
            endpoint = %self.endpoint.base_url,
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "SRU response received"
        );
        Ok(body)
    }
}
