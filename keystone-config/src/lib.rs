//! Feature configuration for Keystone.
//!
//! A [`FeatureConfiguration`] is assembled once, before any feature is
//! applied, from layered sources. Later layers override earlier ones:
//!
//! 1. built-in defaults
//! 2. TOML or JSON files (`[features] web_flux = true`)
//! 3. properties files (`keystone.useWebFlux=true`)
//! 4. environment variables (`KEYSTONE_FEATURES__WEB_FLUX=true`)
//! 5. values set programmatically
//!
//! Every value is checked against the known options when it is loaded, and
//! the assembled configuration is validated by [`ConfigManager::build`].
//! Errors name the offending option.
//!
//! ```
//! use keystone_config::{ConfigManager, FileFormat};
//!
//! let mut manager = ConfigManager::new();
//! manager
//!     .load_str("keystone.useBootJar=true", FileFormat::Properties)
//!     .unwrap();
//! let config = manager.build().unwrap();
//! assert!(config.features.boot_jar);
//! ```

pub mod env;
pub mod error;
pub mod feature;
pub mod loader;
pub mod model;
pub mod options;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use feature::Feature;
pub use loader::{ConfigLoader, FileFormat};
pub use model::{
    FeatureConfiguration, FeaturesConfiguration, LintConfiguration, SUPPORTED_JVM_TARGETS,
    VersionsConfiguration,
};
pub use options::{OptionKind, OptionSpec};
pub use validation::{ConfigValidator, Validate};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Layered configuration assembly.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    values: BTreeMap<String, Value>,
    env_prefix: String,
    property_prefix: String,
}

impl ConfigManager {
    /// Create a manager reading `KEYSTONE_*` variables and `keystone.*` properties
    pub fn new() -> Self {
        Self::with_prefix("keystone")
    }

    /// Create with a custom prefix for environment variables and properties
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            values: BTreeMap::new(),
            env_prefix: prefix.to_uppercase(),
            property_prefix: format!("{}.", prefix.to_lowercase()),
        }
    }

    /// Load a file, detecting its format from the extension
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let loader = ConfigLoader::auto(path)?;
        let data = loader.load_file(path)?;
        keystone_log::debug!(target: "keystone::config", "loaded {}", path.display());
        self.apply(data, loader.format())
    }

    /// Load configuration from a string
    pub fn load_str(&mut self, content: &str, format: FileFormat) -> Result<()> {
        let data = ConfigLoader::new(format).parse(content)?;
        self.apply(data, format)
    }

    /// Load option variables from the environment
    pub fn load_env(&mut self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        for (path, value) in loader.load() {
            self.insert(&path, Value::String(value))?;
        }
        Ok(())
    }

    /// Set an option by its dotted path
    pub fn set<T: Serialize>(&mut self, path: &str, value: T) -> Result<()> {
        let raw = serde_json::to_value(value).map_err(|e| ConfigError::invalid(path, e.to_string()))?;
        self.insert(path, raw)
    }

    /// Get the effective value of an option, defaults included
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        if options::by_path(path).is_none() {
            return Err(ConfigError::UnknownOption(path.to_string()));
        }

        let tree = self.merged()?;
        let value = path
            .split('.')
            .try_fold(&tree, |node, segment| node.get(segment))
            .ok_or_else(|| ConfigError::UnknownOption(path.to_string()))?;

        serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::invalid(path, e.to_string()))
    }

    /// Whether an option was set by any source
    pub fn has(&self, path: &str) -> bool {
        self.values.contains_key(path)
    }

    /// Options set by any source
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Merge options from another manager; its values win
    pub fn merge(&mut self, other: &ConfigManager) {
        for (path, value) in &other.values {
            self.values.insert(path.clone(), value.clone());
        }
    }

    /// Assemble and validate the configuration
    pub fn build(&self) -> Result<FeatureConfiguration> {
        let config: FeatureConfiguration = serde_json::from_value(self.merged()?)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn apply(&mut self, data: Value, format: FileFormat) -> Result<()> {
        match format {
            FileFormat::Properties => {
                let Value::Object(map) = data else {
                    return Ok(());
                };
                for (key, value) in map {
                    let Some(name) = key.strip_prefix(&self.property_prefix) else {
                        keystone_log::trace!(target: "keystone::config", "ignoring property {}", key);
                        continue;
                    };
                    let spec = options::by_property(name)
                        .or_else(|| options::by_path(name))
                        .ok_or_else(|| ConfigError::UnknownOption(key.clone()))?;
                    self.insert(spec.path, value)?;
                }
                Ok(())
            }
            FileFormat::Json | FileFormat::Toml => {
                for (path, value) in loader::flatten(&data) {
                    self.insert(&path, value)?;
                }
                Ok(())
            }
        }
    }

    fn insert(&mut self, path: &str, raw: Value) -> Result<()> {
        let spec = options::by_path(path).ok_or_else(|| ConfigError::UnknownOption(path.to_string()))?;
        let value = spec.coerce(raw)?;
        self.values.insert(spec.path.to_string(), value);
        Ok(())
    }

    fn merged(&self) -> Result<Value> {
        let mut tree = serde_json::to_value(FeatureConfiguration::default())
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;

        for (path, value) in &self.values {
            let mut node = &mut tree;
            let mut segments = path.split('.').peekable();
            while let Some(segment) = segments.next() {
                let Some(map) = node.as_object_mut() else {
                    return Err(ConfigError::UnknownOption(path.clone()));
                };
                if segments.peek().is_none() {
                    map.insert(segment.to_string(), value.clone());
                    break;
                }
                node = map
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(serde_json::Map::new()));
            }
        }

        Ok(tree)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut manager = ConfigManager::new();
        manager.set("features.web_flux", true).unwrap();

        assert!(manager.get::<bool>("features.web_flux").unwrap());
        assert!(manager.has("features.web_flux"));
        assert!(!manager.has("features.boot_jar"));
    }

    #[test]
    fn test_get_falls_back_to_default() {
        let manager = ConfigManager::new();
        let target: String = manager.get("versions.jvm_target").unwrap();
        assert_eq!(target, "1.8");
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut manager = ConfigManager::new();
        let err = manager.set("features.web_socket", true).unwrap_err();
        assert_eq!(err.option(), Some("features.web_socket"));
    }

    #[test]
    fn test_later_layers_override() {
        let mut manager = ConfigManager::new();
        manager
            .load_str("[features]\nweb_flux = true\n", FileFormat::Toml)
            .unwrap();
        manager
            .load_str("keystone.useWebFlux=false", FileFormat::Properties)
            .unwrap();

        let config = manager.build().unwrap();
        assert!(!config.features.web_flux);
    }

    #[test]
    fn test_properties_ignore_foreign_keys() {
        let mut manager = ConfigManager::new();
        manager
            .load_str(
                "org.gradle.jvmargs=-Xmx2g\nkeystone.useBootJar=true\nkeystone.springDevTools=true",
                FileFormat::Properties,
            )
            .unwrap();

        let config = manager.build().unwrap();
        assert!(config.features.boot_jar);
        assert!(config.features.dev_tools);
    }

    #[test]
    fn test_unknown_property_names_key() {
        let mut manager = ConfigManager::new();
        let err = manager
            .load_str("keystone.useWebSockets=true", FileFormat::Properties)
            .unwrap_err();
        assert_eq!(err.option(), Some("keystone.useWebSockets"));
    }

    #[test]
    fn test_build_validates() {
        let mut manager = ConfigManager::new();
        manager.set("versions.jvm_target", "9").unwrap();

        let err = manager.build().unwrap_err();
        assert_eq!(err.option(), Some("versions.jvm_target"));
    }

    #[test]
    fn test_uses_from_json() {
        let mut manager = ConfigManager::new();
        manager
            .load_str(
                r#"{"features": {"use_defaults": true, "uses": ["pitest", "asciidoctor"]}}"#,
                FileFormat::Json,
            )
            .unwrap();

        let config = manager.build().unwrap();
        assert!(config.features.use_defaults);
        assert_eq!(config.features.uses, vec![Feature::Pitest, Feature::Asciidoctor]);
    }

    #[test]
    fn test_merge() {
        let mut base = ConfigManager::new();
        base.set("features.boot_jar", true).unwrap();

        let mut overrides = ConfigManager::new();
        overrides.set("features.boot_jar", false).unwrap();
        overrides.set("lint.android", true).unwrap();

        base.merge(&overrides);
        let config = base.build().unwrap();
        assert!(!config.features.boot_jar);
        assert!(config.lint.android);
        assert_eq!(base.keys(), vec!["features.boot_jar", "lint.android"]);
    }
}
