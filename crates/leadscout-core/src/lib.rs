pub mod app_config;
pub mod config;
pub mod lead;
pub mod query;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use lead::{Lead, SourcePlatform};
pub use query::SearchQuery;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{field} must not be empty")]
    EmptyQueryField { field: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingEnvVar(String),
    #[error("environment variable {var} is invalid: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
