//! The host project handle and the build description mutators write to.

use crate::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Handle to the project being configured.
///
/// Capability state belongs to the host; Keystone only observes it through
/// `has_capability` and changes it through `install_capability`. The build
/// description is the mutable part mutators write settings into.
pub trait Project {
    fn name(&self) -> &str;

    fn has_capability(&self, id: &str) -> bool;

    /// Install a capability. Hosts reject identifiers they cannot resolve
    /// with [`crate::Error::InstallationFailed`].
    fn install_capability(&mut self, id: &str) -> Result<()>;

    fn build(&self) -> &BuildDescription;

    fn build_mut(&mut self) -> &mut BuildDescription;
}

/// A dependency declaration, e.g. `implementation org.jetbrains.kotlin:kotlin-reflect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub configuration: String,
    pub notation: String,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.configuration, self.notation)
    }
}

/// Value of a plugin or compiler option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// `notation` is `module` itself or `module:<version>`.
fn is_module(notation: &str, module: &str) -> bool {
    notation
        .strip_prefix(module)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(':'))
}

/// Settings of a single task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskSettings {
    /// `None` leaves the host default in place
    pub enabled: Option<bool>,
    pub depends_on: Vec<String>,
}

/// Mutable build settings.
///
/// Every setter overwrites or deduplicates, so applying the same change
/// twice leaves the description as applying it once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildDescription {
    dependencies: Vec<Dependency>,
    exclusions: Vec<String>,
    tasks: BTreeMap<String, TaskSettings>,
    options: BTreeMap<String, OptionValue>,
}

impl BuildDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a dependency. Returns `false` if it was already declared.
    pub fn add_dependency(&mut self, configuration: &str, notation: &str) -> bool {
        let exists = self
            .dependencies
            .iter()
            .any(|d| d.configuration == configuration && d.notation == notation);
        if !exists {
            self.dependencies.push(Dependency {
                configuration: configuration.to_string(),
                notation: notation.to_string(),
            });
        }
        !exists
    }

    /// Declare `notation` as the only version of `module` (`group:module`)
    /// in `configuration`. Other versions of the module are removed there.
    /// Returns `false` if `notation` was already the declared one.
    pub fn replace_dependency(&mut self, configuration: &str, module: &str, notation: &str) -> bool {
        self.dependencies.retain(|d| {
            d.configuration != configuration
                || d.notation == notation
                || !is_module(&d.notation, module)
        });
        self.add_dependency(configuration, notation)
    }

    /// Remove a dependency from every configuration. Returns `true` if any was removed.
    pub fn remove_dependency(&mut self, notation: &str) -> bool {
        let before = self.dependencies.len();
        self.dependencies.retain(|d| d.notation != notation);
        before != self.dependencies.len()
    }

    pub fn has_dependency(&self, notation: &str) -> bool {
        self.dependencies.iter().any(|d| d.notation == notation)
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Exclude a `group:module` from every configuration.
    pub fn exclude(&mut self, notation: &str) -> bool {
        if self.exclusions.iter().any(|e| e == notation) {
            return false;
        }
        self.exclusions.push(notation.to_string());
        true
    }

    /// Lift an exclusion. Returns `true` if it was present.
    pub fn include(&mut self, notation: &str) -> bool {
        let before = self.exclusions.len();
        self.exclusions.retain(|e| e != notation);
        before != self.exclusions.len()
    }

    pub fn is_excluded(&self, notation: &str) -> bool {
        self.exclusions.iter().any(|e| e == notation)
    }

    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    /// Make `task` depend on `dependency`. Returns `false` if the edge existed.
    pub fn add_task_dependency(&mut self, task: &str, dependency: &str) -> bool {
        let settings = self.tasks.entry(task.to_string()).or_default();
        if settings.depends_on.iter().any(|d| d == dependency) {
            return false;
        }
        settings.depends_on.push(dependency.to_string());
        true
    }

    pub fn set_task_enabled(&mut self, task: &str, enabled: bool) {
        self.tasks.entry(task.to_string()).or_default().enabled = Some(enabled);
    }

    pub fn task(&self, name: &str) -> Option<&TaskSettings> {
        self.tasks.get(name)
    }

    pub fn tasks(&self) -> impl Iterator<Item = (&str, &TaskSettings)> {
        self.tasks.iter().map(|(name, settings)| (name.as_str(), settings))
    }

    /// Set a plugin option such as `ktlint.android`, replacing any previous value.
    pub fn set_option(&mut self, key: &str, value: impl Into<OptionValue>) {
        self.options.insert(key.to_string(), value.into());
    }

    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    pub fn options(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.options.iter().map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependencies_are_deduplicated() {
        let mut build = BuildDescription::new();
        assert!(build.add_dependency("implementation", "org.example:lib"));
        assert!(!build.add_dependency("implementation", "org.example:lib"));
        assert!(build.add_dependency("testImplementation", "org.example:lib"));
        assert_eq!(build.dependencies().len(), 2);

        assert!(build.remove_dependency("org.example:lib"));
        assert!(!build.has_dependency("org.example:lib"));
        assert!(!build.remove_dependency("org.example:lib"));
    }

    #[test]
    fn test_replace_dependency_drops_other_versions() {
        let mut build = BuildDescription::new();
        build.add_dependency("implementation", "org.example:lib:1.0");
        build.add_dependency("implementation", "org.example:lib-extra:1.0");
        build.add_dependency("testImplementation", "org.example:lib:0.9");

        assert!(build.replace_dependency("implementation", "org.example:lib", "org.example:lib:2.0"));
        assert!(!build.replace_dependency("implementation", "org.example:lib", "org.example:lib:2.0"));

        let declared: Vec<String> = build.dependencies().iter().map(|d| d.to_string()).collect();
        assert_eq!(
            declared,
            vec![
                "implementation org.example:lib-extra:1.0",
                "testImplementation org.example:lib:0.9",
                "implementation org.example:lib:2.0",
            ]
        );
    }

    #[test]
    fn test_dependency_display() {
        let dep = Dependency {
            configuration: "developmentOnly".to_string(),
            notation: "org.springframework.boot:spring-boot-devtools".to_string(),
        };
        assert_eq!(
            dep.to_string(),
            "developmentOnly org.springframework.boot:spring-boot-devtools"
        );
    }

    #[test]
    fn test_exclusions() {
        let mut build = BuildDescription::new();
        assert!(build.exclude("org.springframework:spring-webmvc"));
        assert!(!build.exclude("org.springframework:spring-webmvc"));
        assert!(build.is_excluded("org.springframework:spring-webmvc"));
        assert!(build.include("org.springframework:spring-webmvc"));
        assert!(build.exclusions().is_empty());
    }

    #[test]
    fn test_task_edges_and_enablement() {
        let mut build = BuildDescription::new();
        assert!(build.add_task_dependency("compileKotlin", "ktlintMainSourceSetCheck"));
        assert!(!build.add_task_dependency("compileKotlin", "ktlintMainSourceSetCheck"));
        build.set_task_enabled("bootJar", false);
        build.set_task_enabled("bootJar", true);

        let compile = build.task("compileKotlin").unwrap();
        assert_eq!(compile.depends_on, vec!["ktlintMainSourceSetCheck"]);
        assert_eq!(compile.enabled, None);
        assert_eq!(build.task("bootJar").unwrap().enabled, Some(true));
    }

    #[test]
    fn test_options_overwrite() {
        let mut build = BuildDescription::new();
        build.set_option("ktlint.android", true);
        build.set_option("ktlint.android", false);
        build.set_option("ktlint.disabledRules", vec!["import-ordering".to_string()]);

        assert_eq!(build.option("ktlint.android"), Some(&OptionValue::Bool(false)));
        assert_eq!(
            build.option("ktlint.disabledRules").unwrap().to_string(),
            "[import-ordering]"
        );
        assert_eq!(build.options().count(), 2);
    }
}
