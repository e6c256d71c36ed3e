//! Error types for the Keystone CLI.

use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// IO error (writing output, etc.)
    Io(std::io::Error),

    /// Configuration could not be assembled
    Config(keystone_config::ConfigError),

    /// Feature application aborted
    Apply(keystone_core::Error),

    /// Invalid argument
    InvalidArgument(String),

    /// Output could not be serialized
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::Config(e) => write!(f, "{}", e),
            CliError::Apply(e) => write!(f, "{}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<keystone_config::ConfigError> for CliError {
    fn from(e: keystone_config::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<keystone_core::Error> for CliError {
    fn from(e: keystone_core::Error) -> Self {
        match e {
            keystone_core::Error::Config(e) => CliError::Config(e),
            other => CliError::Apply(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(e: toml::ser::Error) -> Self {
        CliError::Output(e.to_string())
    }
}
