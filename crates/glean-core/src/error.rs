//! Error types for Glean

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("No narrative template registered for insight type '{0}'")]
    MissingTemplate(String),

    #[error("Template for '{insight_type}' references '{{{{{key}}}}}' which is absent from evidence")]
    MissingEvidenceKey { insight_type: String, key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
