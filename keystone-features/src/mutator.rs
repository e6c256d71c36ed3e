//! The mutator contract.

use crate::mutators;
use keystone_config::{Feature, FeatureConfiguration};
use keystone_core::{ChangeRecord, Project, Result};

/// Applies one feature to a project.
///
/// Implementations are idempotent: applying twice with the same
/// configuration leaves the project as applying once, and returns an equal
/// record.
pub trait Mutator: Sync {
    fn feature(&self) -> Feature;

    fn apply(
        &self,
        project: &mut dyn Project,
        config: &FeatureConfiguration,
    ) -> Result<ChangeRecord>;
}

/// The mutator responsible for `feature`.
pub fn for_feature(feature: Feature) -> &'static dyn Mutator {
    match feature {
        Feature::Versions => &mutators::tooling::VersionCheck,
        Feature::Sonar => &mutators::tooling::StaticAnalysis,
        Feature::TestLogger => &mutators::tooling::TestLogging,
        Feature::Asciidoctor => &mutators::tooling::Documentation,
        Feature::Pitest => &mutators::tooling::MutationTesting,
        Feature::Kotlin => &mutators::kotlin::LanguageSupport,
        Feature::Ktlint => &mutators::kotlin::Lint,
        Feature::SpringBoot => &mutators::spring::Framework,
        Feature::Webflux => &mutators::spring::WebStack,
        Feature::BootJar => &mutators::spring::Packaging,
        Feature::CloudContract => &mutators::spring::ContractTesting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_feature_has_its_mutator() {
        for feature in Feature::ALL {
            assert_eq!(for_feature(feature).feature(), feature);
        }
    }
}
