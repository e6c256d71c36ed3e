//! Change records and the report they are collected into.

use serde::{Deserialize, Serialize};

/// What one mutator invocation changed.
///
/// Built once by the mutator and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    name: String,
    description: String,
    dependencies_added: Vec<String>,
    task_changes: Vec<String>,
}

impl ChangeRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            dependencies_added: Vec::new(),
            task_changes: Vec::new(),
        }
    }

    /// Record for a feature that installs a plugin capability.
    pub fn plugin(id: &str, description: impl Into<String>) -> Self {
        Self::new(format!("plugin {}", id), description)
    }

    pub fn with_dependency(mut self, configuration: &str, notation: &str) -> Self {
        self.dependencies_added
            .push(format!("{} {}", configuration, notation));
        self
    }

    pub fn with_task_change(mut self, change: impl Into<String>) -> Self {
        self.task_changes.push(change.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn dependencies_added(&self) -> &[String] {
        &self.dependencies_added
    }

    pub fn task_changes(&self) -> &[String] {
        &self.task_changes
    }

    /// Whether this record added `notation`, in any configuration and at
    /// any version.
    pub fn adds(&self, notation: &str) -> bool {
        self.dependencies_added.iter().any(|line| {
            let added = line.split_once(' ').map_or(line.as_str(), |(_, n)| n);
            added == notation
                || added
                    .strip_prefix(notation)
                    .is_some_and(|rest| rest.starts_with(':'))
        })
    }
}

/// Change records in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    records: Vec<ChangeRecord>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ChangeRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(ChangeRecord::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ChangeRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    /// Position of the first record named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|record| record.name == name)
    }

    /// Whether any record added a dependency on `notation`.
    pub fn adds(&self, notation: &str) -> bool {
        self.records.iter().any(|record| record.adds(notation))
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a ChangeRecord;
    type IntoIter = std::slice::Iter<'a, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Report {
    type Item = ChangeRecord;
    type IntoIter = std::vec::IntoIter<ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<ChangeRecord> for Report {
    fn from_iter<I: IntoIterator<Item = ChangeRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
