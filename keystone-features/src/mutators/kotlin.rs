//! Kotlin language support and linting.

use super::{IMPLEMENTATION, repair_spring_bridge};
use crate::capabilities::{KOTLIN_JVM, KTLINT, deps};
use crate::mutator::Mutator;
use keystone_config::{Feature, FeatureConfiguration};
use keystone_core::{CapabilityRegistry, ChangeRecord, Project, Result};

const COMPILE_TASKS: [(&str, &str); 2] = [
    ("compileKotlin", "ktlintMainSourceSetCheck"),
    ("compileTestKotlin", "ktlintTestSourceSetCheck"),
];

pub struct LanguageSupport;

impl LanguageSupport {
    /// The baseline implementation dependencies, in declaration order.
    pub fn baseline_dependencies(config: &FeatureConfiguration) -> [String; 3] {
        [
            deps::KOTLIN_REFLECT.to_string(),
            deps::KOTLIN_STDLIB.to_string(),
            format!("{}:{}", deps::KOTLIN_LOGGING, config.versions.kotlin_logging),
        ]
    }
}

impl Mutator for LanguageSupport {
    fn feature(&self) -> Feature {
        Feature::Kotlin
    }

    fn apply(&self, project: &mut dyn Project, config: &FeatureConfiguration) -> Result<ChangeRecord> {
        keystone_log::lifecycle!("Apply kotlin support");
        project.install(KOTLIN_JVM)?;
        let bridged = repair_spring_bridge(project)?;

        let jvm_target = &config.versions.jvm_target;
        let dependencies = Self::baseline_dependencies(config);

        let build = project.build_mut();
        let [reflect, stdlib, logging] = &dependencies;
        build.add_dependency(IMPLEMENTATION, reflect);
        build.add_dependency(IMPLEMENTATION, stdlib);
        build.replace_dependency(IMPLEMENTATION, deps::KOTLIN_LOGGING, logging);
        build.set_option("kotlin.jvmTarget", jvm_target.as_str());
        build.set_option("kotlin.suppressWarnings", true);
        build.set_option("kotlin.freeCompilerArgs", vec!["-Xjsr305=strict".to_string()]);

        let mut description = format!("jsr305 strict, jvmTarget {}, suppress warnings", jvm_target);
        if bridged {
            description.push_str(", spring bridge");
        }

        let mut record = ChangeRecord::plugin(KOTLIN_JVM, description);
        for notation in &dependencies {
            record = record.with_dependency(IMPLEMENTATION, notation);
        }
        if bridged {
            record = record.with_dependency(IMPLEMENTATION, deps::JACKSON_KOTLIN);
        }
        Ok(record)
    }
}

/// Ktlint checks run before every kotlin compilation.
pub struct Lint;

impl Mutator for Lint {
    fn feature(&self) -> Feature {
        Feature::Ktlint
    }

    fn apply(&self, project: &mut dyn Project, config: &FeatureConfiguration) -> Result<ChangeRecord> {
        // ktlint's kotlin gradle plugin variant is picked from the kotlin plugin
        project.require(KOTLIN_JVM, Feature::Ktlint.name())?;

        keystone_log::lifecycle!("Apply ktlint support");
        project.install(KTLINT)?;

        let build = project.build_mut();
        build.set_option("ktlint.android", config.lint.android);
        build.set_option("ktlint.disabledRules", config.lint.disabled_rules.clone());

        let mut description = if config.lint.android {
            "android enabled".to_string()
        } else {
            "disable android".to_string()
        };
        if !config.lint.disabled_rules.is_empty() {
            description.push_str(&format!(
                ", disabled rules {}",
                config.lint.disabled_rules.join(", ")
            ));
        }

        let mut record = ChangeRecord::plugin(KTLINT, description);
        for (task, check) in COMPILE_TASKS {
            build.add_task_dependency(task, check);
            record = record.with_task_change(format!("{} dependsOn {}", task, check));
        }
        Ok(record)
    }
}
