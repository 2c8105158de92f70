use thiserror::Error;

use crate::app_config::{AppConfig, Environment, DEFAULT_USER_AGENT};

/// Hard ceiling on concurrent fetches against the source site.
pub const MAX_IN_FLIGHT_CAP: usize = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[source] serde_yaml::Error),

    #[error("invalid sources file: {0}")]
    Validation(String),
}

/// Load application configuration from environment variables already in the process.
///
/// Does not read `.env` files. Binaries call `dotenvy::dotenv()` at startup,
/// before argument parsing.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let source_origin = parse_origin(&require("VITRINE_SOURCE_ORIGIN")?)?;
    let env = parse_environment(&or_default("VITRINE_ENV", "development"))?;

    let bind_addr = or_default("VITRINE_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("VITRINE_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("VITRINE_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default("VITRINE_SOURCES_PATH", "./config/sources.yaml"));
    let api_keys = or_default("VITRINE_API_KEYS", "")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let scraper_request_timeout_secs = parse_u64("VITRINE_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    if scraper_request_timeout_secs == 0 {
        return Err(invalid(
            "VITRINE_SCRAPER_REQUEST_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let scraper_user_agent = or_default("VITRINE_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_max_in_flight = parse_usize("VITRINE_SCRAPER_MAX_IN_FLIGHT", "4")?;
    if !(1..=MAX_IN_FLIGHT_CAP).contains(&scraper_max_in_flight) {
        return Err(invalid(
            "VITRINE_SCRAPER_MAX_IN_FLIGHT",
            format!("must be between 1 and {MAX_IN_FLIGHT_CAP}, got {scraper_max_in_flight}"),
        ));
    }
    let image_scan_radius = parse_usize("VITRINE_IMAGE_SCAN_RADIUS", "1500")?;

    Ok(AppConfig {
        source_origin,
        env,
        bind_addr,
        log_level,
        sources_path,
        api_keys,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_in_flight,
        image_scan_radius,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VITRINE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Validates the configured source origin: it must be an absolute `http(s)`
/// URL. A trailing slash is dropped so joins produce exactly one `/`.
fn parse_origin(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("https://") || trimmed.starts_with("http://");
    let has_host = trimmed
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.is_empty());
    if !has_scheme || !has_host {
        return Err(ConfigError::InvalidEnvVar {
            var: "VITRINE_SOURCE_ORIGIN".to_string(),
            reason: format!("\"{raw}\" is not an absolute http(s) origin"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
