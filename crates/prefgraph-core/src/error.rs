use thiserror::Error;

use crate::config::ConfigError;
use crate::OptionKind;

#[derive(Error, Debug)]
pub enum PrefGraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An event option reached bubble-up without its category or channel.
    #[error("Malformed option: {0}")]
    MalformedOption(String),

    /// Aggregation over zero children. Indicates a broken hierarchy, not bad user input.
    #[error("Empty group: {0}")]
    EmptyGroup(String),

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: OptionKind, id: String },

    #[error("Profile is read-only: {0}")]
    ReadOnlyProfile(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, PrefGraphError>;
