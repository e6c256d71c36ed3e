// Error types for feature configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value for option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl ConfigError {
    pub fn invalid(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }

    /// The option this error is about, if it concerns a single option.
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::UnknownOption(option) => Some(option),
            Self::InvalidOption { option, .. } => Some(option),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
