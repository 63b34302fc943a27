//! Error types for waterfall

use thiserror::Error;

/// Result type alias for waterfall operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for waterfall
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] waterfall_core::Error),

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
