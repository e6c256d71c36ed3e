//! Spring boot and the features layered on top of it.

use super::{DEVELOPMENT_ONLY, IMPLEMENTATION, TEST_IMPLEMENTATION, repair_spring_bridge};
use crate::capabilities::{CLOUD_CONTRACT, DEPENDENCY_MANAGEMENT, SPRING_BOOT, deps};
use crate::mutator::Mutator;
use keystone_config::{Feature, FeatureConfiguration};
use keystone_core::{CapabilityRegistry, ChangeRecord, Project, Result};

/// Blocking stack artifacts kept off the classpath when webflux is active.
const BLOCKING_STACK: [&str; 2] = [deps::TOMCAT, deps::WEBMVC];

pub struct Framework;

impl Mutator for Framework {
    fn feature(&self) -> Feature {
        Feature::SpringBoot
    }

    fn apply(&self, project: &mut dyn Project, _config: &FeatureConfiguration) -> Result<ChangeRecord> {
        keystone_log::lifecycle!("Apply spring boot support");
        project.install(SPRING_BOOT)?;
        project.install(DEPENDENCY_MANAGEMENT)?;
        let bridged = repair_spring_bridge(project)?;

        let build = project.build_mut();
        build.add_dependency(IMPLEMENTATION, deps::SPRING_ACTUATOR);
        build.add_dependency(TEST_IMPLEMENTATION, deps::SPRING_TEST);

        let mut description = String::from("actuator and test starter");
        if bridged {
            description.push_str(", spring bridge");
        }

        let mut record = ChangeRecord::plugin(SPRING_BOOT, description)
            .with_dependency(IMPLEMENTATION, deps::SPRING_ACTUATOR)
            .with_dependency(TEST_IMPLEMENTATION, deps::SPRING_TEST);
        if bridged {
            record = record.with_dependency(IMPLEMENTATION, deps::JACKSON_KOTLIN);
        }
        Ok(record)
    }
}

/// Reactive or blocking web stack, never both.
pub struct WebStack;

impl Mutator for WebStack {
    fn feature(&self) -> Feature {
        Feature::Webflux
    }

    fn apply(&self, project: &mut dyn Project, config: &FeatureConfiguration) -> Result<ChangeRecord> {
        project.require(SPRING_BOOT, Feature::Webflux.name())?;
        let build = project.build_mut();

        if config.features.web_flux {
            keystone_log::lifecycle!("Apply webflux support");
            build.remove_dependency(deps::WEBMVC_STARTER);
            build.add_dependency(IMPLEMENTATION, deps::WEBFLUX_STARTER);
            for notation in BLOCKING_STACK {
                build.exclude(notation);
            }
            Ok(
                ChangeRecord::new("webflux", "webflux enabled and webmvc + tomcat excluded")
                    .with_dependency(IMPLEMENTATION, deps::WEBFLUX_STARTER),
            )
        } else {
            keystone_log::lifecycle!("Apply webmvc support");
            build.remove_dependency(deps::WEBFLUX_STARTER);
            for notation in BLOCKING_STACK {
                build.include(notation);
            }
            build.add_dependency(IMPLEMENTATION, deps::WEBMVC_STARTER);
            Ok(ChangeRecord::new("webflux", "webmvc enabled")
                .with_dependency(IMPLEMENTATION, deps::WEBMVC_STARTER))
        }
    }
}

/// Executable archive packaging.
///
/// Reports in both directions so a disabled archive is visible in the report.
pub struct Packaging;

impl Mutator for Packaging {
    fn feature(&self) -> Feature {
        Feature::BootJar
    }

    fn apply(&self, project: &mut dyn Project, config: &FeatureConfiguration) -> Result<ChangeRecord> {
        project.require(SPRING_BOOT, Feature::BootJar.name())?;
        let build = project.build_mut();

        if !config.features.boot_jar {
            keystone_log::lifecycle!("Disable bootJar");
            build.set_task_enabled("bootJar", false);
            build.set_task_enabled("jar", true);
            build.remove_dependency(deps::DEVTOOLS);
            return Ok(ChangeRecord::new("bootJar", "bootJar disabled")
                .with_task_change("bootJar disabled")
                .with_task_change("jar enabled"));
        }

        keystone_log::lifecycle!("Enable bootJar");
        build.set_task_enabled("bootJar", true);
        build.set_task_enabled("jar", false);

        let mut record = ChangeRecord::new("bootJar", "bootJar enabled")
            .with_task_change("bootJar enabled")
            .with_task_change("jar disabled");

        if config.features.dev_tools {
            build.add_dependency(DEVELOPMENT_ONLY, deps::DEVTOOLS);
            record = record.with_dependency(DEVELOPMENT_ONLY, deps::DEVTOOLS);
        } else {
            build.remove_dependency(deps::DEVTOOLS);
        }
        Ok(record)
    }
}

pub struct ContractTesting;

impl Mutator for ContractTesting {
    fn feature(&self) -> Feature {
        Feature::CloudContract
    }

    fn apply(&self, project: &mut dyn Project, _config: &FeatureConfiguration) -> Result<ChangeRecord> {
        project.require(SPRING_BOOT, Feature::CloudContract.name())?;

        keystone_log::lifecycle!("Apply spring cloud contract support");
        project.install(CLOUD_CONTRACT)?;

        let build = project.build_mut();
        build.add_dependency(TEST_IMPLEMENTATION, deps::CONTRACT_STUB_RUNNER);
        build.add_dependency(TEST_IMPLEMENTATION, deps::CONTRACT_VERIFIER);
        build.set_option("contracts.testFramework", "JUNIT5");

        Ok(
            ChangeRecord::plugin(CLOUD_CONTRACT, "stub runner and verifier, junit5")
                .with_dependency(TEST_IMPLEMENTATION, deps::CONTRACT_STUB_RUNNER)
                .with_dependency(TEST_IMPLEMENTATION, deps::CONTRACT_VERIFIER),
        )
    }
}
