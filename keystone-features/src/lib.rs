//! Feature mutators and orchestration for Keystone.
//!
//! Every [`Feature`] has one [`Mutator`] that installs the capabilities it
//! needs and edits the project's build description. A [`Session`] applies
//! "use X" requests in order, runs each mutator at most once and collects
//! what changed into a [`Report`].
//!
//! # Quick Start
//!
//! ```
//! use keystone_features::*;
//!
//! let config = FeatureConfiguration::default().with_web_flux(true);
//! let mut project = BuildProject::new("app");
//!
//! let report = apply(&mut project, &config, &[FeatureRequest::Defaults]).unwrap();
//!
//! assert_eq!(report.len(), 9);
//! assert_eq!(
//!     report.get("webflux").unwrap().description(),
//!     "webflux enabled and webmvc + tomcat excluded"
//! );
//! ```
//!
//! # Ordering
//!
//! Features that build on another one fail with
//! [`Error::MissingPrerequisite`] unless the capability they need is
//! installed. Nest them under their prerequisite:
//!
//! ```
//! use keystone_features::*;
//!
//! let config = FeatureConfiguration::default();
//! let mut project = BuildProject::new("app");
//!
//! let err = apply(&mut project, &config, &[Feature::Ktlint.into()]).unwrap_err();
//! assert!(matches!(err, Error::MissingPrerequisite { .. }));
//!
//! let request = FeatureRequest::composite(Feature::Kotlin, [Feature::Ktlint]);
//! let report = apply(&mut project, &config, &[request]).unwrap();
//! assert_eq!(report.len(), 2);
//! ```

pub mod capabilities;
pub mod mutator;
pub mod mutators;
pub mod session;

pub use mutator::{Mutator, for_feature};
pub use session::{FeatureRequest, Session, apply, requests_from_config};

pub use keystone_config::{Feature, FeatureConfiguration};
pub use keystone_core::{
    BuildProject, CapabilityRegistry, ChangeRecord, Error, Project, Report, Result,
};
