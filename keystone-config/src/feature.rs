//! Feature vocabulary.
//!
//! Every feature a build can request by name. Names are kebab-case both on
//! the command line and in configuration files (`uses = ["kotlin", "ktlint"]`).

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A feature that can be requested with "use X".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    /// Dependency update checks
    Versions,
    /// Static analysis
    Sonar,
    /// Test logging
    TestLogger,
    /// Documentation generation
    Asciidoctor,
    /// Mutation testing
    Pitest,
    /// Kotlin language support
    Kotlin,
    /// Kotlin linting
    Ktlint,
    /// Spring Boot framework
    SpringBoot,
    /// Reactive (webflux) vs. blocking (webmvc) web stack
    Webflux,
    /// Executable archive packaging and devtools
    BootJar,
    /// Consumer driven contract testing
    CloudContract,
}

impl Feature {
    pub const ALL: [Feature; 11] = [
        Feature::Versions,
        Feature::Sonar,
        Feature::TestLogger,
        Feature::Asciidoctor,
        Feature::Pitest,
        Feature::Kotlin,
        Feature::Ktlint,
        Feature::SpringBoot,
        Feature::Webflux,
        Feature::BootJar,
        Feature::CloudContract,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::Versions => "versions",
            Feature::Sonar => "sonar",
            Feature::TestLogger => "test-logger",
            Feature::Asciidoctor => "asciidoctor",
            Feature::Pitest => "pitest",
            Feature::Kotlin => "kotlin",
            Feature::Ktlint => "ktlint",
            Feature::SpringBoot => "spring-boot",
            Feature::Webflux => "webflux",
            Feature::BootJar => "boot-jar",
            Feature::CloudContract => "cloud-contract",
        }
    }

    /// The feature that must have been applied before this one.
    pub fn prerequisite(&self) -> Option<Feature> {
        match self {
            Feature::Ktlint => Some(Feature::Kotlin),
            Feature::Webflux | Feature::BootJar | Feature::CloudContract => {
                Some(Feature::SpringBoot)
            }
            _ => None,
        }
    }

    /// One line description for listings.
    pub fn summary(&self) -> &'static str {
        match self {
            Feature::Versions => "report dependency updates, stable versions only",
            Feature::Sonar => "static analysis with sonarqube",
            Feature::TestLogger => "readable test output",
            Feature::Asciidoctor => "asciidoc documentation with test snippets",
            Feature::Pitest => "mutation testing",
            Feature::Kotlin => "kotlin toolchain, stdlib, reflection and logging",
            Feature::Ktlint => "kotlin lint checks before compilation",
            Feature::SpringBoot => "spring boot application support",
            Feature::Webflux => "reactive web stack instead of webmvc",
            Feature::BootJar => "executable boot jar, optionally devtools",
            Feature::CloudContract => "spring cloud contract stubs and verifier",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Feature::ALL
            .into_iter()
            .find(|feature| feature.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_names() {
        assert_eq!("kotlin".parse::<Feature>().unwrap(), Feature::Kotlin);
        assert_eq!("spring-boot".parse::<Feature>().unwrap(), Feature::SpringBoot);
        assert_eq!("Boot_Jar".parse::<Feature>().unwrap(), Feature::BootJar);
        assert!("gradle".parse::<Feature>().is_err());
    }

    #[test]
    fn test_name_matches_serde() {
        for feature in Feature::ALL {
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(json, format!("\"{}\"", feature.name()));
        }
    }

    #[test]
    fn test_prerequisites() {
        assert_eq!(Feature::Ktlint.prerequisite(), Some(Feature::Kotlin));
        assert_eq!(Feature::Webflux.prerequisite(), Some(Feature::SpringBoot));
        assert_eq!(Feature::Kotlin.prerequisite(), None);
        assert_eq!(Feature::SpringBoot.prerequisite(), None);
    }
}
