//! Integration tests for keystone-config

use keystone_config::*;
use std::fs;

#[test]
fn test_load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keystone.toml");
    fs::write(
        &path,
        r#"
        [versions]
        kotlin_logging = "2.0.11"
        jvm_target = "11"

        [features]
        uses = ["sonar", "kotlin"]
        boot_jar = true

        [lint]
        disabled_rules = ["import-ordering", "no-wildcard-imports"]
        "#,
    )
    .unwrap();

    let mut manager = ConfigManager::new();
    manager.load_file(&path).unwrap();
    let config = manager.build().unwrap();

    assert_eq!(config.versions.kotlin_logging, "2.0.11");
    assert_eq!(config.versions.jvm_target, "11");
    assert_eq!(config.features.uses, vec![Feature::Sonar, Feature::Kotlin]);
    assert!(config.features.boot_jar);
    assert_eq!(
        config.lint.disabled_rules,
        vec!["import-ordering", "no-wildcard-imports"]
    );
}

#[test]
fn test_load_properties_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradle.properties");
    fs::write(
        &path,
        "kotlin.code.style=official\nkeystone.useWebFlux=true\nkeystone.use=versions, pitest\n",
    )
    .unwrap();

    let mut manager = ConfigManager::new();
    manager.load_file(&path).unwrap();
    let config = manager.build().unwrap();

    assert!(config.features.web_flux);
    assert_eq!(config.features.uses, vec![Feature::Versions, Feature::Pitest]);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keystone.yaml");
    fs::write(&path, "features: {}").unwrap();

    let mut manager = ConfigManager::new();
    assert!(matches!(
        manager.load_file(&path),
        Err(ConfigError::LoadError(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = ConfigManager::new();
    let result = manager.load_file(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::LoadError(_))));
}

#[test]
fn test_wrong_type_in_toml_names_option() {
    let mut manager = ConfigManager::new();
    let err = manager
        .load_str("[features]\nboot_jar = \"sometimes\"\n", FileFormat::Toml)
        .unwrap_err();

    assert_eq!(err.option(), Some("features.boot_jar"));
}

#[test]
fn test_unknown_section_in_toml() {
    let mut manager = ConfigManager::new();
    let err = manager
        .load_str("[deploy]\ntarget = \"prod\"\n", FileFormat::Toml)
        .unwrap_err();

    assert!(matches!(err, ConfigError::UnknownOption(ref o) if o == "deploy.target"));
}

#[test]
fn test_invalid_version_rejected_at_build() {
    let mut manager = ConfigManager::new();
    manager
        .load_str("keystone.kotlinLoggingVersion=latest", FileFormat::Properties)
        .unwrap();

    let err = manager.build().unwrap_err();
    assert_eq!(err.option(), Some("versions.kotlin_logging"));
}

#[test]
fn test_custom_prefix_properties() {
    let mut manager = ConfigManager::with_prefix("build");
    manager
        .load_str("build.useBootJar=true\nkeystone.useWebFlux=true", FileFormat::Properties)
        .unwrap();

    let config = manager.build().unwrap();
    assert!(config.features.boot_jar);
    assert!(!config.features.web_flux);
}
