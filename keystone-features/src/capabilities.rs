//! Capability identifiers and dependency coordinates used by the mutators.

use keystone_config::Feature;

pub const VERSIONS: &str = "com.github.ben-manes.versions";
pub const SONARQUBE: &str = "org.sonarqube";
pub const TEST_LOGGER: &str = "com.adarshr.test-logger";
pub const ASCIIDOCTOR: &str = "org.asciidoctor.convert";
pub const PITEST: &str = "info.solidsoft.pitest";
pub const KOTLIN_JVM: &str = "org.jetbrains.kotlin.jvm";
pub const KTLINT: &str = "org.jlleitschuh.gradle.ktlint";
pub const SPRING_BOOT: &str = "org.springframework.boot";
pub const DEPENDENCY_MANAGEMENT: &str = "io.spring.dependency-management";
pub const CLOUD_CONTRACT: &str = "org.springframework.cloud.contract";

/// Needed only when both kotlin and spring boot are installed.
pub const KOTLIN_SPRING_BRIDGE: &str = "org.jetbrains.kotlin.plugin.spring";

pub mod deps {
    pub const KOTLIN_REFLECT: &str = "org.jetbrains.kotlin:kotlin-reflect";
    pub const KOTLIN_STDLIB: &str = "org.jetbrains.kotlin:kotlin-stdlib-jdk8";
    pub const KOTLIN_LOGGING: &str = "io.github.microutils:kotlin-logging";
    pub const JACKSON_KOTLIN: &str = "com.fasterxml.jackson.module:jackson-module-kotlin";

    pub const SPRING_ACTUATOR: &str = "org.springframework.boot:spring-boot-starter-actuator";
    pub const SPRING_TEST: &str = "org.springframework.boot:spring-boot-starter-test";
    pub const WEBMVC_STARTER: &str = "org.springframework.boot:spring-boot-starter-web";
    pub const WEBFLUX_STARTER: &str = "org.springframework.boot:spring-boot-starter-webflux";
    pub const TOMCAT: &str = "org.springframework.boot:spring-boot-starter-tomcat";
    pub const WEBMVC: &str = "org.springframework:spring-webmvc";
    pub const DEVTOOLS: &str = "org.springframework.boot:spring-boot-devtools";

    pub const CONTRACT_STUB_RUNNER: &str =
        "org.springframework.cloud:spring-cloud-starter-contract-stub-runner";
    pub const CONTRACT_VERIFIER: &str =
        "org.springframework.cloud:spring-cloud-starter-contract-verifier";
}

/// The capability a feature installs, if it installs one.
pub fn of(feature: Feature) -> Option<&'static str> {
    match feature {
        Feature::Versions => Some(VERSIONS),
        Feature::Sonar => Some(SONARQUBE),
        Feature::TestLogger => Some(TEST_LOGGER),
        Feature::Asciidoctor => Some(ASCIIDOCTOR),
        Feature::Pitest => Some(PITEST),
        Feature::Kotlin => Some(KOTLIN_JVM),
        Feature::Ktlint => Some(KTLINT),
        Feature::SpringBoot => Some(SPRING_BOOT),
        Feature::CloudContract => Some(CLOUD_CONTRACT),
        Feature::Webflux | Feature::BootJar => None,
    }
}
