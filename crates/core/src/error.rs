//! Error types for waterfall-core (WASM-compatible)

use thiserror::Error;

/// Result type alias for waterfall-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that work in both native and WASM environments
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Version {version} has mismatched commit fields (ids: {ids}, messages: {messages}, authors: {authors}, revisions: {revisions}, create_times: {create_times})")]
    MismatchedCommitFields {
        version: usize,
        ids: usize,
        messages: usize,
        authors: usize,
        revisions: usize,
        create_times: usize,
    },

    #[error("Version {0} has no commits")]
    EmptyVersion(usize),

    #[error("Standalone version {version} carries {commits} commits")]
    StandaloneWithManyCommits { version: usize, commits: usize },

    #[error("Version {version} has {builds} builds but the grid has {variants} build variants")]
    MisalignedBuilds {
        version: String,
        builds: usize,
        variants: usize,
    },

    #[error("Version {version} row {row} holds build variant '{found}' but the row is '{expected}'")]
    MismatchedVariant {
        version: String,
        row: usize,
        expected: String,
        found: String,
    },

    #[error("Invalid timestamp '{value}'")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
