// Error types for feature application

use keystone_config::ConfigError;
use thiserror::Error;

/// Errors that abort a feature application session.
///
/// None of these are transient; they point at a configuration or ordering
/// mistake and are never retried.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to install capability '{capability}': {reason}")]
    InstallationFailed { capability: String, reason: String },

    #[error("Feature '{feature}' requires {requirement}, which is not installed")]
    MissingPrerequisite { feature: String, requirement: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn installation_failed(capability: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InstallationFailed {
            capability: capability.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_prerequisite(feature: impl Into<String>, requirement: impl Into<String>) -> Self {
        Self::MissingPrerequisite {
            feature: feature.into(),
            requirement: requirement.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
