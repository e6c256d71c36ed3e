//! Keystone core model.
//!
//! - [`Project`]: the host project handle mutators operate on
//! - [`CapabilityRegistry`]: idempotent capability installation on any project
//! - [`BuildProject`]: an in-memory host
//! - [`ChangeRecord`] and [`Report`]: what was changed, in application order
//! - [`Error`]: why a session was aborted

pub mod error;
pub mod memory;
pub mod project;
pub mod registry;
pub mod report;

pub use error::{Error, Result};
pub use memory::BuildProject;
pub use project::{BuildDescription, Dependency, OptionValue, Project, TaskSettings};
pub use registry::{CapabilityRegistry, Installation};
pub use report::{ChangeRecord, Report};
