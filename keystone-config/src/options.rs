//! Known options and how raw values are coerced into them.

use crate::{ConfigError, Feature, Result};
use serde_json::Value;

/// Value shape of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Text,
    /// Array, or a comma separated string
    List,
    /// List of feature names
    Features,
}

/// A configurable option.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    /// Dotted path in [`crate::FeatureConfiguration`]
    pub path: &'static str,
    /// Name in properties files, after the `keystone.` prefix
    pub property: &'static str,
    pub kind: OptionKind,
}

pub const OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        path: "features.use_defaults",
        property: "useDefaults",
        kind: OptionKind::Bool,
    },
    OptionSpec {
        path: "features.uses",
        property: "use",
        kind: OptionKind::Features,
    },
    OptionSpec {
        path: "features.web_flux",
        property: "useWebFlux",
        kind: OptionKind::Bool,
    },
    OptionSpec {
        path: "features.boot_jar",
        property: "useBootJar",
        kind: OptionKind::Bool,
    },
    OptionSpec {
        path: "features.dev_tools",
        property: "springDevTools",
        kind: OptionKind::Bool,
    },
    OptionSpec {
        path: "versions.kotlin_logging",
        property: "kotlinLoggingVersion",
        kind: OptionKind::Text,
    },
    OptionSpec {
        path: "versions.jvm_target",
        property: "jvmTarget",
        kind: OptionKind::Text,
    },
    OptionSpec {
        path: "lint.android",
        property: "ktlintAndroid",
        kind: OptionKind::Bool,
    },
    OptionSpec {
        path: "lint.disabled_rules",
        property: "ktlintDisabledRules",
        kind: OptionKind::List,
    },
];

/// Find an option by its dotted path.
pub fn by_path(path: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.path == path)
}

/// Find an option by its properties name (without prefix).
pub fn by_property(property: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.property == property)
}

impl OptionSpec {
    /// Coerce a raw value into this option's shape.
    pub fn coerce(&self, raw: Value) -> Result<Value> {
        match self.kind {
            OptionKind::Bool => match raw {
                Value::Bool(b) => Ok(Value::Bool(b)),
                Value::String(s) => match s.trim().to_lowercase().as_str() {
                    "true" | "1" | "yes" => Ok(Value::Bool(true)),
                    "false" | "0" | "no" => Ok(Value::Bool(false)),
                    _ => Err(self.invalid(format!("'{}' is not a boolean", s))),
                },
                other => Err(self.invalid(format!("expected a boolean, got {}", other))),
            },
            OptionKind::Text => match raw {
                Value::String(s) => Ok(Value::String(s.trim().to_string())),
                Value::Number(n) => Ok(Value::String(n.to_string())),
                other => Err(self.invalid(format!("expected a string, got {}", other))),
            },
            OptionKind::List => self.items(raw).map(|items| {
                Value::Array(items.into_iter().map(Value::String).collect())
            }),
            OptionKind::Features => {
                let items = self.items(raw)?;
                let mut features = Vec::with_capacity(items.len());
                for item in items {
                    let feature: Feature = item.parse().map_err(|_| {
                        self.invalid(format!("unknown feature '{}'", item))
                    })?;
                    features.push(Value::String(feature.name().to_string()));
                }
                Ok(Value::Array(features))
            }
        }
    }

    fn items(&self, raw: Value) -> Result<Vec<String>> {
        match raw {
            Value::String(s) => Ok(s
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()),
            Value::Array(values) => values
                .into_iter()
                .map(|value| match value {
                    Value::String(s) => Ok(s),
                    other => Err(self.invalid(format!("expected strings, got {}", other))),
                })
                .collect(),
            other => Err(self.invalid(format!("expected a list, got {}", other))),
        }
    }

    fn invalid(&self, message: String) -> ConfigError {
        ConfigError::invalid(self.path, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup() {
        assert_eq!(by_property("useWebFlux").unwrap().path, "features.web_flux");
        assert_eq!(by_path("versions.jvm_target").unwrap().property, "jvmTarget");
        assert!(by_path("features.nope").is_none());
    }

    #[test]
    fn test_bool_coercion() {
        let spec = by_path("features.boot_jar").unwrap();
        assert_eq!(spec.coerce(json!("TRUE")).unwrap(), json!(true));
        assert_eq!(spec.coerce(json!(false)).unwrap(), json!(false));

        let err = spec.coerce(json!("maybe")).unwrap_err();
        assert_eq!(err.option(), Some("features.boot_jar"));
    }

    #[test]
    fn test_text_coercion_accepts_numbers() {
        let spec = by_path("versions.jvm_target").unwrap();
        assert_eq!(spec.coerce(json!(11)).unwrap(), json!("11"));
        assert!(spec.coerce(json!(true)).is_err());
    }

    #[test]
    fn test_list_coercion() {
        let spec = by_path("lint.disabled_rules").unwrap();
        assert_eq!(
            spec.coerce(json!("import-ordering, no-wildcard-imports")).unwrap(),
            json!(["import-ordering", "no-wildcard-imports"])
        );
        assert_eq!(spec.coerce(json!([])).unwrap(), json!([]));
        assert!(spec.coerce(json!([1, 2])).is_err());
    }

    #[test]
    fn test_feature_list_coercion() {
        let spec = by_path("features.uses").unwrap();
        assert_eq!(
            spec.coerce(json!("Sonar,boot_jar")).unwrap(),
            json!(["sonar", "boot-jar"])
        );

        let err = spec.coerce(json!(["sonar", "maven"])).unwrap_err();
        assert_eq!(err.option(), Some("features.uses"));
        assert!(err.to_string().contains("maven"));
    }
}
