//! HTTP fetcher for catalog pages.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Retrieves raw page markup with a browser-like identity.
///
/// Non-2xx responses, network failures and timeouts come back as typed
/// [`ScraperError`] transport variants. There is no retry at this layer;
/// retry policy belongs to the caller.
pub struct PageFetcher {
    client: Client,
    timeout_secs: u64,
}

impl PageFetcher {
    /// Creates a `PageFetcher` with the given per-request timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Fetches one page and returns its body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] — `url` is not an absolute http(s) URL (no request made).
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ScraperError::Timeout`] — the request exceeded the configured timeout.
    /// - [`ScraperError::Request`] — network, TLS or body-decoding failure.
    pub async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let parsed = validate_url(url)?;
        // Sent as the referer so the request reads as in-site navigation.
        let referer = parsed.origin().ascii_serialization();
        let domain = parsed.host_str().unwrap_or_default().to_owned();

        let response = self
            .client
            .get(parsed)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9,en;q=0.8")
            .header(reqwest::header::REFERER, &referer)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, domain = %domain, status = status.as_u16(), "fetch rejected");
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "fetched page");
        Ok(body)
    }

    fn transport_error(&self, url: &str, source: reqwest::Error) -> ScraperError {
        if source.is_timeout() {
            ScraperError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.timeout_secs,
            }
        } else {
            ScraperError::Request {
                url: url.to_owned(),
                source,
            }
        }
    }
}

/// Parses `url` and checks it is an absolute `http`/`https` URL.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] for blank, relative, or non-http URLs.
fn validate_url(url: &str) -> Result<reqwest::Url, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason,
    };

    if url.trim().is_empty() {
        return Err(invalid("URL is empty".to_string()));
    }

    let parsed = reqwest::Url::parse(url.trim()).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(invalid(format!("unsupported scheme \"{other}\""))),
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
