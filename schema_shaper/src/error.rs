//! Error types for SchemaShaper

use thiserror::Error;

/// Result type for SchemaShaper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for SchemaShaper
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Ingestion error: {0}")]
    IngestionError(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Name collision in {scope}: '{from}' cannot be renamed to '{to}', the name is already taken")]
    NameCollision {
        scope: String,
        from: String,
        to: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Convert Serde JSON errors to SchemaShaper errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert Serde YAML errors to SchemaShaper errors
impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert TOML deserialization errors to SchemaShaper errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}
