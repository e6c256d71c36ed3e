//! In-memory project host.
//!
//! Stands in for a real build tool: it keeps the installed capability set,
//! the build description and a log of every installation it performed.

use crate::project::{BuildDescription, Project};
use crate::{Error, Result};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct BuildProject {
    name: String,
    capabilities: BTreeSet<String>,
    /// Installable identifiers; `None` accepts any identifier
    catalog: Option<BTreeSet<String>>,
    installs: Vec<String>,
    build: BuildDescription,
}

impl BuildProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: BTreeSet::new(),
            catalog: None,
            installs: Vec::new(),
            build: BuildDescription::new(),
        }
    }

    /// Restrict installable capabilities to the given identifiers.
    pub fn with_catalog<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.catalog = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Declare a capability the project already has, as if applied in the
    /// build file. It does not count as an installation.
    pub fn with_capability(mut self, id: impl Into<String>) -> Self {
        self.capabilities.insert(id.into());
        self
    }

    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.capabilities.iter().map(String::as_str)
    }

    /// Installations performed through [`Project::install_capability`], in order.
    pub fn installs(&self) -> &[String] {
        &self.installs
    }

    pub fn install_count(&self, id: &str) -> usize {
        self.installs.iter().filter(|installed| *installed == id).count()
    }
}

impl Project for BuildProject {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_capability(&self, id: &str) -> bool {
        self.capabilities.contains(id)
    }

    fn install_capability(&mut self, id: &str) -> Result<()> {
        if let Some(catalog) = &self.catalog
            && !catalog.contains(id)
        {
            return Err(Error::installation_failed(
                id,
                format!("not available to project '{}'", self.name),
            ));
        }

        self.capabilities.insert(id.to_string());
        self.installs.push(id.to_string());
        Ok(())
    }

    fn build(&self) -> &BuildDescription {
        &self.build
    }

    fn build_mut(&mut self) -> &mut BuildDescription {
        &mut self.build
    }
}
