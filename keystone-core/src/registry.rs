//! Capability registry.
//!
//! Idempotent installation on top of any [`Project`]: call sites never check
//! for a capability before installing it.

use crate::project::Project;
use crate::{Error, Result};

/// Outcome of [`CapabilityRegistry::install`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installation {
    Installed,
    AlreadyPresent,
}

pub trait CapabilityRegistry {
    fn has(&self, id: &str) -> bool;

    /// Install `id` unless it is already present.
    fn install(&mut self, id: &str) -> Result<Installation>;

    /// Fail with `MissingPrerequisite` unless `id` is installed.
    fn require(&self, id: &str, feature: &str) -> Result<()> {
        if self.has(id) {
            Ok(())
        } else {
            Err(Error::missing_prerequisite(feature, id))
        }
    }
}

impl<P: Project + ?Sized> CapabilityRegistry for P {
    fn has(&self, id: &str) -> bool {
        self.has_capability(id)
    }

    fn install(&mut self, id: &str) -> Result<Installation> {
        if self.has_capability(id) {
            keystone_log::debug!(target: "keystone::registry", "{} already installed", id);
            return Ok(Installation::AlreadyPresent);
        }

        self.install_capability(id)?;

        if !self.has_capability(id) {
            return Err(Error::installation_failed(
                id,
                "host accepted the installation but does not report it",
            ));
        }

        keystone_log::debug!(target: "keystone::registry", "installed {} into {}", id, self.name());
        Ok(Installation::Installed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuildProject;
    use crate::project::BuildDescription;

    #[test]
    fn test_install_is_idempotent() {
        let mut project = BuildProject::new("app");

        assert_eq!(project.install("org.sonarqube").unwrap(), Installation::Installed);
        assert_eq!(
            project.install("org.sonarqube").unwrap(),
            Installation::AlreadyPresent
        );
        assert!(project.has("org.sonarqube"));
        assert_eq!(project.install_count("org.sonarqube"), 1);
    }

    #[test]
    fn test_install_declared_capability_is_noop() {
        let mut project = BuildProject::new("app").with_capability("org.jetbrains.kotlin.jvm");
        assert_eq!(
            project.install("org.jetbrains.kotlin.jvm").unwrap(),
            Installation::AlreadyPresent
        );
        assert!(project.installs().is_empty());
    }

    #[test]
    fn test_install_failure_surfaces() {
        let mut project = BuildProject::new("app").with_catalog(Vec::<String>::new());
        let err = project.install("org.sonarqube").unwrap_err();
        assert!(matches!(err, Error::InstallationFailed { .. }));
    }

    #[test]
    fn test_require() {
        let project = BuildProject::new("app").with_capability("org.jetbrains.kotlin.jvm");
        assert!(project.require("org.jetbrains.kotlin.jvm", "ktlint").is_ok());

        let err = project.require("org.springframework.boot", "webflux").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingPrerequisite { ref feature, ref requirement }
                if feature == "webflux" && requirement == "org.springframework.boot"
        ));
    }

    /// A host that acknowledges installs without recording them.
    struct ForgetfulHost {
        build: BuildDescription,
    }

    impl Project for ForgetfulHost {
        fn name(&self) -> &str {
            "forgetful"
        }

        fn has_capability(&self, _id: &str) -> bool {
            false
        }

        fn install_capability(&mut self, _id: &str) -> Result<()> {
            Ok(())
        }

        fn build(&self) -> &BuildDescription {
            &self.build
        }

        fn build_mut(&mut self) -> &mut BuildDescription {
            &mut self.build
        }
    }

    #[test]
    fn test_install_checks_host_state() {
        let mut host = ForgetfulHost {
            build: BuildDescription::new(),
        };
        let err = host.install("org.sonarqube").unwrap_err();
        assert!(matches!(err, Error::InstallationFailed { .. }));
    }
}
