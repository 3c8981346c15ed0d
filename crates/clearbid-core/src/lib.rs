//! Shared types for ClearBid: the listing under evaluation, gate thresholds,
//! and the env-driven application config.

pub mod app_config;
pub mod config;
pub mod listing;

pub use app_config::{AppConfig, GateThresholds};
pub use config::{
    load_app_config, load_app_config_from_env, load_unvalidated_app_config, log_level_from_env,
    validate_thresholds,
};
pub use listing::{load_listing, parse_listing, ListingInput};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read listing file {path}: {source}")]
    ListingFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse listing file: {0}")]
    ListingFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
