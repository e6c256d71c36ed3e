//! Config command
//!
//! Assembles the feature configuration from its sources and prints it.

use crate::error::CliResult;
use keystone_config::{ConfigManager, FeatureConfiguration};
use std::path::PathBuf;

/// Where the configuration comes from, in override order.
#[derive(Debug, Default)]
pub struct Sources {
    pub files: Vec<PathBuf>,
    /// Read `KEYSTONE_*` option variables after the files
    pub env: bool,
    /// Command line overrides, applied last
    pub sets: Vec<(String, String)>,
}

impl Sources {
    /// Assemble and validate the configuration.
    pub fn load(&self) -> CliResult<FeatureConfiguration> {
        let mut manager = ConfigManager::new();
        for file in &self.files {
            manager.load_file(file)?;
        }
        if self.env {
            manager.load_env()?;
        }
        for (option, value) in &self.sets {
            manager.set(option, value)?;
        }
        Ok(manager.build()?)
    }
}

/// Print the assembled configuration as TOML (or JSON).
pub fn execute(sources: Sources, json: bool) -> CliResult<()> {
    let config = sources.load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}
