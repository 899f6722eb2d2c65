//! Error types for the marga front-end.

use thiserror::Error;

/// Front-end error type.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Search error: {0}")]
    Search(#[from] marga_core::SearchError),
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
