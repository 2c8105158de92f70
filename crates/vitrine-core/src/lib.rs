pub mod app_config;
pub mod config;
pub mod import;
pub mod products;
pub mod sources;

pub use app_config::{AppConfig, Environment, DEFAULT_USER_AGENT};
pub use config::{load_app_config_from_env, ConfigError, MAX_IN_FLIGHT_CAP};
pub use import::{ImportFailure, ImportSummary, PageReport};
pub use products::{ExtractionStrategy, ProductRecord};
pub use sources::{load_sources, SourceConfig, SourcesFile};
