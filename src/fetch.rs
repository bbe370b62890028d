//! HTTP collaborators: listing page fetches and file transfers.
//!
//! Both fetchers share one cookie-enabled [`reqwest::Client`] built by
//! [`build_http_client`], so the session state Drive sets on the first page
//! fetch is carried through the rest of the invocation instead of living in
//! ambient process-wide state.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::url;

/// Fetches the text of a folder listing page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the page body for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] for a non-success response.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// Transfers one remote file to a local destination path.
///
/// Retry, throttling, and proxy behavior are entirely this primitive's
/// concern; callers only observe success or failure.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Fetches the file with remote id `id` into `dest`, returning the
    /// number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileTransferFailed`] if the transfer does not
    /// complete.
    async fn fetch_file(&self, id: &str, dest: &Path) -> Result<u64>;
}

/// Builds the shared HTTP client used for all fetches in one invocation.
///
/// # Errors
///
/// Returns an error if the TLS backend fails to initialize.
pub fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .cookie_store(true)
        .pool_idle_timeout(Duration::from_secs(60))
        .pool_max_idle_per_host(8)
        .tcp_keepalive(Duration::from_secs(30))
        .build()
}

/// Listing page fetcher backed by `reqwest`.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Creates a page fetcher on an existing client.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchFailed {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }
        Ok(response.text().await?)
    }
}

/// File transfer primitive backed by `reqwest`, streaming the body to disk.
pub struct HttpFileFetcher {
    client: reqwest::Client,
}

impl HttpFileFetcher {
    /// Creates a file fetcher on an existing client.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FileFetcher for HttpFileFetcher {
    async fn fetch_file(&self, id: &str, dest: &Path) -> Result<u64> {
        let fail = |reason: String| Error::FileTransferFailed {
            id: id.to_string(),
            path: dest.display().to_string(),
            reason,
        };

        let fetch_url = url::file_url(id);
        let response = self
            .client
            .get(&fetch_url)
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("HTTP {status}")));
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| fail(e.to_string()))?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| fail(e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| fail(e.to_string()))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| fail(e.to_string()))?;
        Ok(written)
    }
}
