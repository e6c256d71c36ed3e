//! CLI command implementations.

pub mod config;
pub mod features;
pub mod report;
