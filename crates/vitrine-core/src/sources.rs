use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One catalog page the batch job imports from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Operator-facing label, e.g. `"Anéis"`.
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

impl SourcesFile {
    /// Source URLs in file order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.url.clone()).collect()
    }
}

/// Load and validate the batch source list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_sources(&content)
}

fn parse_sources(content: &str) -> Result<SourcesFile, ConfigError> {
    let mut sources_file: SourcesFile =
        serde_yaml::from_str(content).map_err(ConfigError::SourcesFileParse)?;

    for source in &mut sources_file.sources {
        source.url = source.url.trim().to_string();
    }

    validate_sources(&sources_file)?;

    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    if sources_file.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one source URL is required".to_string(),
        ));
    }

    let mut seen_urls = HashSet::new();

    for source in &sources_file.sources {
        if source.url.is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' has an empty url",
                source.name.as_deref().unwrap_or("<unnamed>")
            )));
        }

        if !source.url.starts_with("http://") && !source.url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "source url '{}' must be absolute http(s)",
                source.url
            )));
        }

        if !seen_urls.insert(source.url.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source url: '{}'",
                source.url
            )));
        }
    }

    Ok(())
}
