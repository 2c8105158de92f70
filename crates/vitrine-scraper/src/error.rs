use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid source URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("no source URLs provided")]
    EmptyBatch,
}

impl ScraperError {
    /// The HTTP status observed before the failure, when there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ScraperError::UnexpectedStatus { status, .. } => Some(*status),
            ScraperError::Request { source, .. } | ScraperError::Http(source) => {
                source.status().map(|s| s.as_u16())
            }
            _ => None,
        }
    }

    /// Returns `true` for failures of the fetch itself (status, network,
    /// timeout). These are recorded per URL and never abort a batch.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ScraperError::Request { .. }
                | ScraperError::Timeout { .. }
                | ScraperError::UnexpectedStatus { .. }
        )
    }
}
