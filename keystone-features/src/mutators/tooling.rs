//! Build tooling features: version checks, static analysis, test logging,
//! documentation and mutation testing.

use crate::capabilities::{ASCIIDOCTOR, PITEST, SONARQUBE, TEST_LOGGER, VERSIONS};
use crate::mutator::Mutator;
use keystone_config::{Feature, FeatureConfiguration};
use keystone_core::{CapabilityRegistry, ChangeRecord, Project, Result};

/// Dependency update report that only proposes stable releases.
pub struct VersionCheck;

impl Mutator for VersionCheck {
    fn feature(&self) -> Feature {
        Feature::Versions
    }

    fn apply(&self, project: &mut dyn Project, _config: &FeatureConfiguration) -> Result<ChangeRecord> {
        keystone_log::lifecycle!("Apply versions support");
        project.install(VERSIONS)?;

        let build = project.build_mut();
        build.set_option("dependencyUpdates.revision", "release");
        build.set_option("dependencyUpdates.rejectVersionIf", "non-stable");

        Ok(ChangeRecord::plugin(
            VERSIONS,
            "only stable versions are upgrade candidates",
        ))
    }
}

pub struct StaticAnalysis;

impl Mutator for StaticAnalysis {
    fn feature(&self) -> Feature {
        Feature::Sonar
    }

    fn apply(&self, project: &mut dyn Project, _config: &FeatureConfiguration) -> Result<ChangeRecord> {
        keystone_log::lifecycle!("Apply sonar support");
        project.install(SONARQUBE)?;

        Ok(ChangeRecord::plugin(SONARQUBE, "enabled"))
    }
}

pub struct TestLogging;

impl Mutator for TestLogging {
    fn feature(&self) -> Feature {
        Feature::TestLogger
    }

    fn apply(&self, project: &mut dyn Project, _config: &FeatureConfiguration) -> Result<ChangeRecord> {
        keystone_log::lifecycle!("Apply test logger support");
        project.install(TEST_LOGGER)?;

        let build = project.build_mut();
        build.set_option("testlogger.theme", "mocha");
        build.set_option("testlogger.showSimpleNames", true);

        Ok(ChangeRecord::plugin(TEST_LOGGER, "theme mocha"))
    }
}

/// Asciidoctor rendering fed by snippets the test task generates.
pub struct Documentation;

impl Mutator for Documentation {
    fn feature(&self) -> Feature {
        Feature::Asciidoctor
    }

    fn apply(&self, project: &mut dyn Project, _config: &FeatureConfiguration) -> Result<ChangeRecord> {
        keystone_log::lifecycle!("Apply asciidoctor support");
        project.install(ASCIIDOCTOR)?;

        let build = project.build_mut();
        build.set_option("asciidoctor.snippets", "build/generated-snippets");
        build.add_task_dependency("asciidoctor", "test");

        Ok(
            ChangeRecord::plugin(ASCIIDOCTOR, "snippets wired into asciidoctor")
                .with_task_change("asciidoctor dependsOn test"),
        )
    }
}

pub struct MutationTesting;

impl Mutator for MutationTesting {
    fn feature(&self) -> Feature {
        Feature::Pitest
    }

    fn apply(&self, project: &mut dyn Project, _config: &FeatureConfiguration) -> Result<ChangeRecord> {
        keystone_log::lifecycle!("Apply pitest support");
        project.install(PITEST)?;

        let build = project.build_mut();
        build.set_option("pitest.testPlugin", "junit5");
        build.set_option(
            "pitest.outputFormats",
            vec!["XML".to_string(), "HTML".to_string()],
        );

        Ok(ChangeRecord::plugin(PITEST, "junit5 plugin, xml and html output"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::{BuildProject, OptionValue};

    fn apply_twice(mutator: &dyn Mutator) -> (BuildProject, ChangeRecord) {
        let config = FeatureConfiguration::default();
        let mut project = BuildProject::new("app");

        let first = mutator.apply(&mut project, &config).unwrap();
        let state = project.build().clone();
        let second = mutator.apply(&mut project, &config).unwrap();

        assert_eq!(first, second);
        assert_eq!(&state, project.build());
        (project, second)
    }

    #[test]
    fn test_version_check() {
        let (project, record) = apply_twice(&VersionCheck);
        assert_eq!(record.name(), "plugin com.github.ben-manes.versions");
        assert_eq!(project.install_count(VERSIONS), 1);
        assert_eq!(
            project.build().option("dependencyUpdates.revision"),
            Some(&OptionValue::Text("release".to_string()))
        );
    }

    #[test]
    fn test_static_analysis() {
        let (project, record) = apply_twice(&StaticAnalysis);
        assert_eq!(record.description(), "enabled");
        assert!(project.has(SONARQUBE));
    }

    #[test]
    fn test_test_logging() {
        let (project, record) = apply_twice(&TestLogging);
        assert_eq!(record.description(), "theme mocha");
        assert_eq!(project.install_count(TEST_LOGGER), 1);
    }

    #[test]
    fn test_documentation_wires_test_task() {
        let (project, record) = apply_twice(&Documentation);
        assert_eq!(record.task_changes(), ["asciidoctor dependsOn test"]);
        assert_eq!(
            project.build().task("asciidoctor").unwrap().depends_on,
            vec!["test"]
        );
    }

    #[test]
    fn test_mutation_testing() {
        let (project, _) = apply_twice(&MutationTesting);
        assert_eq!(
            project.build().option("pitest.testPlugin"),
            Some(&OptionValue::Text("junit5".to_string()))
        );
    }
}
