//! Feature mutators, one module per feature area.

pub mod kotlin;
pub mod spring;
pub mod tooling;

use crate::capabilities::{KOTLIN_JVM, KOTLIN_SPRING_BRIDGE, SPRING_BOOT, deps};
use keystone_core::{CapabilityRegistry, Installation, Project, Result};

const IMPLEMENTATION: &str = "implementation";
const TEST_IMPLEMENTATION: &str = "testImplementation";
const DEVELOPMENT_ONLY: &str = "developmentOnly";

/// Restore the kotlin/spring invariant: with both capabilities installed the
/// bridge plugin and jackson's kotlin module must be present too.
///
/// Both the language and the framework mutator call this after their own
/// installation, so the outcome does not depend on which runs first.
/// Returns whether the invariant applies to this project.
fn repair_spring_bridge(project: &mut dyn Project) -> Result<bool> {
    if !(project.has(KOTLIN_JVM) && project.has(SPRING_BOOT)) {
        return Ok(false);
    }

    if project.install(KOTLIN_SPRING_BRIDGE)? == Installation::Installed {
        keystone_log::lifecycle!("Apply kotlin spring bridge");
    }
    project
        .build_mut()
        .add_dependency(IMPLEMENTATION, deps::JACKSON_KOTLIN);

    Ok(true)
}
