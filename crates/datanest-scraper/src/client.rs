use std::io::Write;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tempfile::NamedTempFile;

use crate::error::ScraperError;

/// HTTP client for downloading source feeds.
///
/// Every request carries the configured descriptive `User-Agent` and a
/// bounded timeout. There is no automatic retry: a transient network failure
/// fails the whole harvest run, and the external trigger decides when to try
/// again.
pub struct FeedClient {
    client: Client,
}

/// A downloaded feed, spooled to a local scratch file.
///
/// The underlying temp file is removed when the value is dropped, on success
/// and failure paths alike.
#[derive(Debug)]
pub struct ScratchCopy {
    file: NamedTempFile,
}

impl ScratchCopy {
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl FeedClient {
    /// Creates a `FeedClient` with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Downloads `url` into a scratch copy on local disk.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] — network or TLS failure, or timeout.
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx response.
    /// - [`ScraperError::Io`] — the scratch file could not be written.
    pub async fn download(&self, url: &str) -> Result<ScratchCopy, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.bytes().await?;
        let mut file = NamedTempFile::new()?;
        file.write_all(&body)?;
        file.flush()?;

        tracing::debug!(url, bytes = body.len(), "feed downloaded to scratch copy");
        Ok(ScratchCopy { file })
    }
}
