//! Feature application sessions.
//!
//! A [`Session`] applies requests to one project in the order they are
//! issued, invokes each feature's mutator at most once and collects the
//! records into a [`Report`].

use crate::capabilities;
use crate::mutator::for_feature;
use keystone_config::{Feature, FeatureConfiguration, Validate};
use keystone_core::{CapabilityRegistry, Project, Report, Result};
use serde::{Deserialize, Serialize};

/// A "use X" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureRequest {
    /// The fixed default feature set, see [`FeatureRequest::defaults`].
    Defaults,
    /// Every feature whose capability the project already has, plus the
    /// configuration-driven variants of a detected parent.
    Detected,
    /// One feature, followed by requests that build on it.
    Use {
        feature: Feature,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        nested: Vec<FeatureRequest>,
    },
}

impl FeatureRequest {
    pub fn feature(feature: Feature) -> Self {
        Self::Use {
            feature,
            nested: Vec::new(),
        }
    }

    /// A feature with nested requests applied right after it.
    pub fn composite<I, R>(feature: Feature, nested: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<FeatureRequest>,
    {
        Self::Use {
            feature,
            nested: nested.into_iter().map(Into::into).collect(),
        }
    }

    /// Expansion of [`FeatureRequest::Defaults`].
    pub fn defaults() -> Vec<FeatureRequest> {
        vec![
            Feature::Versions.into(),
            Feature::Sonar.into(),
            Feature::TestLogger.into(),
            Self::composite(Feature::Kotlin, [Feature::Ktlint]),
            Self::composite(
                Feature::SpringBoot,
                [Feature::Webflux, Feature::BootJar, Feature::CloudContract],
            ),
        ]
    }

    /// Expansion of [`FeatureRequest::Detected`] for `project`.
    ///
    /// Children with a capability are nested only when it is present.
    /// Children without one (webflux, boot-jar) only select a variant of
    /// their parent, so they are nested whenever the parent is detected.
    pub fn detected(project: &dyn Project) -> Vec<FeatureRequest> {
        let present = |feature: Feature| capabilities::of(feature).map(|id| project.has(id));

        Feature::ALL
            .into_iter()
            .filter(|feature| feature.prerequisite().is_none() && present(*feature) == Some(true))
            .map(|parent| {
                let children = Feature::ALL
                    .into_iter()
                    .filter(|child| child.prerequisite() == Some(parent))
                    .filter(|child| present(*child) != Some(false));
                Self::composite(parent, children)
            })
            .collect()
    }
}

impl From<Feature> for FeatureRequest {
    fn from(feature: Feature) -> Self {
        Self::feature(feature)
    }
}

/// Requests described by the configuration's `features` section: the
/// defaults if `use_defaults` is set, then every feature in `uses`.
pub fn requests_from_config(config: &FeatureConfiguration) -> Vec<FeatureRequest> {
    let mut requests = Vec::with_capacity(config.features.uses.len() + 1);
    if config.features.use_defaults {
        requests.push(FeatureRequest::Defaults);
    }
    requests.extend(config.features.uses.iter().copied().map(FeatureRequest::from));
    requests
}

/// Apply `requests` to `project` in order.
///
/// Fails fast: the first error is returned and the records collected so far
/// are dropped. Capabilities installed before the failure stay installed.
pub fn apply(
    project: &mut dyn Project,
    config: &FeatureConfiguration,
    requests: &[FeatureRequest],
) -> Result<Report> {
    let mut session = Session::new(config)?;
    for request in requests {
        session.request(project, request)?;
    }

    keystone_log::info!(
        target: "keystone::session",
        "applied {} feature(s) to {}",
        session.applied().len(),
        project.name()
    );
    Ok(session.into_report())
}

/// Orchestration state for one project.
#[derive(Debug)]
pub struct Session<'c> {
    config: &'c FeatureConfiguration,
    applied: Vec<Feature>,
    report: Report,
}

impl<'c> Session<'c> {
    /// Start a session. The configuration is validated here and read-only
    /// from then on.
    pub fn new(config: &'c FeatureConfiguration) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            applied: Vec::new(),
            report: Report::new(),
        })
    }

    pub fn config(&self) -> &FeatureConfiguration {
        self.config
    }

    /// Apply one request. Its effects are visible to every later request.
    pub fn request(&mut self, project: &mut dyn Project, request: &FeatureRequest) -> Result<()> {
        match request {
            FeatureRequest::Defaults => {
                for request in FeatureRequest::defaults() {
                    self.request(project, &request)?;
                }
            }
            FeatureRequest::Detected => {
                for request in FeatureRequest::detected(project) {
                    self.request(project, &request)?;
                }
            }
            FeatureRequest::Use { feature, nested } => {
                self.use_feature(project, *feature)?;
                for request in nested {
                    self.request(project, request)?;
                }
            }
        }
        Ok(())
    }

    fn use_feature(&mut self, project: &mut dyn Project, feature: Feature) -> Result<()> {
        if self.is_applied(feature) {
            keystone_log::debug!(target: "keystone::session", "{} already applied", feature);
            return Ok(());
        }

        keystone_log::debug!(target: "keystone::session", "applying {}", feature);
        let record = for_feature(feature).apply(project, self.config)?;
        self.applied.push(feature);
        self.report.push(record);
        Ok(())
    }

    pub fn is_applied(&self, feature: Feature) -> bool {
        self.applied.contains(&feature)
    }

    /// Features applied so far, in order.
    pub fn applied(&self) -> &[Feature] {
        &self.applied
    }

    /// Records collected so far, including those from before a failed request.
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn into_report(self) -> Report {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::{BuildProject, Error};

    #[test]
    fn test_defaults_order() {
        let flattened: Vec<Feature> = FeatureRequest::defaults()
            .iter()
            .flat_map(|request| match request {
                FeatureRequest::Use { feature, nested } => std::iter::once(*feature)
                    .chain(nested.iter().filter_map(|n| match n {
                        FeatureRequest::Use { feature, .. } => Some(*feature),
                        _ => None,
                    }))
                    .collect::<Vec<_>>(),
                _ => Vec::new(),
            })
            .collect();

        assert_eq!(
            flattened,
            vec![
                Feature::Versions,
                Feature::Sonar,
                Feature::TestLogger,
                Feature::Kotlin,
                Feature::Ktlint,
                Feature::SpringBoot,
                Feature::Webflux,
                Feature::BootJar,
                Feature::CloudContract,
            ]
        );
    }

    #[test]
    fn test_requests_from_config() {
        let config = FeatureConfiguration::default()
            .with_defaults()
            .with_feature(Feature::Pitest);

        assert_eq!(
            requests_from_config(&config),
            vec![FeatureRequest::Defaults, Feature::Pitest.into()]
        );
        assert!(requests_from_config(&FeatureConfiguration::default()).is_empty());
    }

    #[test]
    fn test_detected_nests_children() {
        let project = BuildProject::new("app")
            .with_capability(capabilities::KTLINT)
            .with_capability(capabilities::KOTLIN_JVM);

        assert_eq!(
            FeatureRequest::detected(&project),
            vec![FeatureRequest::composite(Feature::Kotlin, [Feature::Ktlint])]
        );
    }

    #[test]
    fn test_detected_framework_nests_variants() {
        let project = BuildProject::new("app").with_capability(capabilities::SPRING_BOOT);

        assert_eq!(
            FeatureRequest::detected(&project),
            vec![FeatureRequest::composite(
                Feature::SpringBoot,
                [Feature::Webflux, Feature::BootJar]
            )]
        );
    }

    #[test]
    fn test_feature_applied_once() {
        let config = FeatureConfiguration::default();
        let mut project = BuildProject::new("app");
        let mut session = Session::new(&config).unwrap();

        session.request(&mut project, &Feature::Sonar.into()).unwrap();
        session.request(&mut project, &Feature::Sonar.into()).unwrap();

        assert_eq!(session.applied(), [Feature::Sonar]);
        assert_eq!(session.report().len(), 1);
    }

    #[test]
    fn test_partial_report_after_failure() {
        let config = FeatureConfiguration::default();
        let mut project = BuildProject::new("app");
        let mut session = Session::new(&config).unwrap();

        session.request(&mut project, &Feature::Versions.into()).unwrap();
        let err = session
            .request(&mut project, &Feature::Ktlint.into())
            .unwrap_err();

        assert!(matches!(err, Error::MissingPrerequisite { .. }));
        assert_eq!(session.report().len(), 1);
        assert!(!session.is_applied(Feature::Ktlint));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FeatureConfiguration::default().with_jvm_target("9");
        let err = Session::new(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_request_serde() {
        let request: FeatureRequest =
            serde_json::from_str(r#"{"use":{"feature":"kotlin","nested":[{"use":{"feature":"ktlint"}}]}}"#)
                .unwrap();
        assert_eq!(
            request,
            FeatureRequest::composite(Feature::Kotlin, [Feature::Ktlint])
        );
    }
}
