use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// A fetched page: status code and body text.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Plain GET client for HTML pages.
///
/// Requests are issued one at a time by the callers; there is no retry,
/// backoff, or rate limiting. Without a configured timeout a hung endpoint
/// blocks the caller.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the given `User-Agent` and optional
    /// per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: Option<u64>, user_agent: &str) -> Result<Self, ScraperError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Issues a GET and returns the status and body, whatever the status.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on network or TLS failure, or if the
    /// body cannot be read.
    pub async fn fetch(&self, url: &str) -> Result<Page, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(url, status, bytes = body.len(), "fetched page");
        Ok(Page { status, body })
    }

    /// Issues a GET and returns the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure.
    pub async fn fetch_ok(&self, url: &str) -> Result<String, ScraperError> {
        let page = self.fetch(url).await?;
        if !page.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: page.status,
                url: url.to_owned(),
            });
        }
        Ok(page.body)
    }
}
