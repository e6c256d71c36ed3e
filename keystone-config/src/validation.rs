// Configuration validation

use crate::{ConfigError, Result};

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Validation rules. Every failure names the option it concerns.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, option: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(option, "cannot be empty"));
        }
        Ok(())
    }

    /// Validate that a value is in a list of allowed values
    pub fn one_of<T: PartialEq + std::fmt::Debug>(
        value: &T,
        allowed: &[T],
        option: &str,
    ) -> Result<()> {
        if !allowed.contains(value) {
            return Err(ConfigError::invalid(
                option,
                format!("{:?} is not one of {:?}", value, allowed),
            ));
        }
        Ok(())
    }

    /// Validate a dotted version such as `1.12.5` or `2.0.0-RC1`
    pub fn is_version(value: &str, option: &str) -> Result<()> {
        Self::not_empty(value, option)?;

        let (release, qualifier) = match value.split_once('-') {
            Some((release, qualifier)) => (release, Some(qualifier)),
            None => (value, None),
        };

        let numeric = release
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));

        let qualifier_ok = qualifier
            .map(|q| !q.is_empty() && q.chars().all(|c| c.is_ascii_alphanumeric() || c == '.'))
            .unwrap_or(true);

        if !numeric || !qualifier_ok {
            return Err(ConfigError::invalid(
                option,
                format!("'{}' is not a version", value),
            ));
        }
        Ok(())
    }

    /// Validate a lint rule identifier (`import-ordering`, `experimental:indent`)
    pub fn is_rule_id(value: &str, option: &str) -> Result<()> {
        Self::not_empty(value, option)?;

        let valid = value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == ':');

        if !valid || value.starts_with('-') || value.ends_with('-') {
            return Err(ConfigError::invalid(
                option,
                format!("'{}' is not a rule identifier", value),
            ));
        }
        Ok(())
    }
}
