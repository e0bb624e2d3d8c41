use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for sweeper operations.
pub type SweeperResult<T> = Result<T, SweeperError>;

/// A specialized `Result` type for template loading.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// A specialized `Result` type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to load template {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Template '{name}' has no pixels")]
    Empty { name: String },

    #[error("At least one target template is required")]
    NoTargets,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// The error type for everything the engine and binary can fail on.
#[derive(Debug, Error)]
pub enum SweeperError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Worker task failed to complete: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

impl ConfigError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            reason: reason.into(),
        }
    }
}
