use std::net::SocketAddr;
use std::path::PathBuf;

/// Desktop-browser identity sent with every page fetch. Some storefronts
/// reject requests that do not look like a browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Fixed origin (scheme + host) used to absolutize scraped URLs.
    pub source_origin: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub sources_path: PathBuf,
    pub api_keys: Vec<String>,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Upper bound on concurrent page fetches in one batch import.
    pub scraper_max_in_flight: usize,
    /// Character radius scanned around a product link for `<img>` tags.
    pub image_scan_radius: usize,
}

impl AppConfig {
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.env == Environment::Development
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("source_origin", &self.source_origin)
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("sources_path", &self.sources_path)
            .field("api_keys", &format!("[{} redacted]", self.api_keys.len()))
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_max_in_flight", &self.scraper_max_in_flight)
            .field("image_scan_radius", &self.image_scan_radius)
            .finish()
    }
}
