//! Typed feature configuration.

use crate::validation::{ConfigValidator, Validate};
use crate::{Feature, Result};
use serde::{Deserialize, Serialize};

/// JVM targets the kotlin compiler options accept.
pub const SUPPORTED_JVM_TARGETS: &[&str] = &["1.8", "11", "17", "21"];

/// All options that steer feature application.
///
/// Assembled before orchestration (see [`crate::ConfigManager`]) and only
/// read while mutators run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfiguration {
    pub versions: VersionsConfiguration,
    pub features: FeaturesConfiguration,
    pub lint: LintConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionsConfiguration {
    /// Version of `io.github.microutils:kotlin-logging`
    pub kotlin_logging: String,
    pub jvm_target: String,
}

impl Default for VersionsConfiguration {
    fn default() -> Self {
        Self {
            kotlin_logging: "1.12.5".to_string(),
            jvm_target: "1.8".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfiguration {
    /// Request the default feature set
    pub use_defaults: bool,
    /// Features requested by name, applied after the defaults
    pub uses: Vec<Feature>,
    /// Reactive web stack instead of webmvc
    pub web_flux: bool,
    /// Executable boot jar packaging
    pub boot_jar: bool,
    /// Add spring devtools; only honored together with `boot_jar`
    pub dev_tools: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfiguration {
    pub android: bool,
    pub disabled_rules: Vec<String>,
}

impl Default for LintConfiguration {
    fn default() -> Self {
        Self {
            android: false,
            disabled_rules: vec!["import-ordering".to_string()],
        }
    }
}

impl FeatureConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(mut self) -> Self {
        self.features.use_defaults = true;
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.uses.push(feature);
        self
    }

    pub fn with_web_flux(mut self, enabled: bool) -> Self {
        self.features.web_flux = enabled;
        self
    }

    pub fn with_boot_jar(mut self, enabled: bool) -> Self {
        self.features.boot_jar = enabled;
        self
    }

    pub fn with_dev_tools(mut self, enabled: bool) -> Self {
        self.features.dev_tools = enabled;
        self
    }

    pub fn with_jvm_target(mut self, target: impl Into<String>) -> Self {
        self.versions.jvm_target = target.into();
        self
    }

    pub fn with_kotlin_logging(mut self, version: impl Into<String>) -> Self {
        self.versions.kotlin_logging = version.into();
        self
    }

    pub fn with_disabled_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lint.disabled_rules = rules.into_iter().map(Into::into).collect();
        self
    }
}

impl Validate for FeatureConfiguration {
    fn validate(&self) -> Result<()> {
        ConfigValidator::is_version(&self.versions.kotlin_logging, "versions.kotlin_logging")?;
        ConfigValidator::one_of(
            &self.versions.jvm_target.as_str(),
            SUPPORTED_JVM_TARGETS,
            "versions.jvm_target",
        )?;
        for rule in &self.lint.disabled_rules {
            ConfigValidator::is_rule_id(rule, "lint.disabled_rules")?;
        }
        if self.features.dev_tools && !self.features.boot_jar {
            keystone_log::warn!(
                target: "keystone::config",
                "features.dev_tools has no effect while features.boot_jar is off"
            );
        }
        Ok(())
    }
}
