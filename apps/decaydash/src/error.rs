//! Error types for dataset loading and argument parsing.

use thiserror::Error;

/// Result type for decaydash operations
pub type Result<T> = std::result::Result<T, DecayError>;

/// Errors surfaced to the CLI. Classification itself never fails.
#[derive(Error, Debug)]
pub enum DecayError {
    /// Dataset or config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML dataset: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML dataset: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is not one of json|toml|yaml|yml
    #[error("unsupported dataset format: '{0}' (expected .json, .toml, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// Strict mode rejected a dataset with error-level issues
    #[error("dataset violates the data contract ({0} error(s)); run `decaydash check` for details")]
    Contract(usize),

    /// A selector or option value could not be parsed
    #[error("invalid {what}: '{value}' (expected one of: {expected})")]
    InvalidValue {
        what: &'static str,
        value: String,
        expected: &'static str,
    },
}
