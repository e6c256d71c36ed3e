// Keystone - feature toggle composition for build configuration
//
// Resolves "use X" feature requests, applies each feature to a mutable build
// description and reports what changed.

// Re-export the project model and feature orchestration
pub use keystone_core::*;
pub use keystone_features::{
    Feature, FeatureConfiguration, FeatureRequest, Mutator, Session, apply, capabilities,
    for_feature, mutators, requests_from_config,
};

pub use keystone_features;

// Layered configuration loading (files, properties, environment)
#[cfg(feature = "config")]
pub use keystone_config;

#[cfg(feature = "config")]
pub use keystone_config::ConfigManager;

#[cfg(feature = "log")]
pub use keystone_log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        BuildDescription, BuildProject, CapabilityRegistry, ChangeRecord, Error, Feature,
        FeatureConfiguration, FeatureRequest, Installation, Project, Report, Result, Session,
        apply,
    };

    #[cfg(feature = "config")]
    pub use crate::ConfigManager;
}
