//! Report command - apply features and render the change report.

use super::config::Sources;
use crate::error::{CliError, CliResult};
use keystone_config::Feature;
use keystone_core::{BuildProject, Report};
use keystone_features::{FeatureRequest, apply, requests_from_config};
use std::io::{self, Write};

pub const TITLE: &str = "----- Keystone Report -----";
pub const FOOTER: &str = "------- End Report -------";

/// Options for the report command.
pub struct ReportOptions {
    pub sources: Sources,
    pub defaults: bool,
    pub uses: Vec<Feature>,
    pub detect: bool,
    pub plugins: Vec<String>,
    pub name: String,
    pub json: bool,
}

impl ReportOptions {
    /// Requests in application order: configured ones first, then the
    /// command line's.
    fn requests(&self, configured: Vec<FeatureRequest>) -> Vec<FeatureRequest> {
        let mut requests = configured;
        if self.detect {
            requests.push(FeatureRequest::Detected);
        }
        if self.defaults {
            requests.push(FeatureRequest::Defaults);
        }
        requests.extend(self.uses.iter().copied().map(FeatureRequest::from));
        requests
    }
}

pub fn execute(options: ReportOptions) -> CliResult<()> {
    let config = options.sources.load()?;
    let requests = options.requests(requests_from_config(&config));
    if requests.is_empty() {
        return Err(CliError::InvalidArgument(
            "nothing to apply; pass --defaults, --detect or --use <FEATURE>".to_string(),
        ));
    }

    let mut project = options
        .plugins
        .iter()
        .fold(BuildProject::new(options.name.as_str()), |project, id| {
            project.with_capability(id.as_str())
        });

    let report = apply(&mut project, &config, &requests)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if options.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        render(&mut out, &report)?;
    }
    Ok(())
}

/// Render the report as a titled block with one sub-block per record.
pub fn render(out: &mut impl Write, report: &Report) -> io::Result<()> {
    writeln!(out, "{}", TITLE)?;
    for record in report {
        writeln!(out)?;
        writeln!(out, "{}", record.name())?;
        if !record.description().is_empty() {
            writeln!(out, "  {}", record.description())?;
        }
        if !record.dependencies_added().is_empty() {
            writeln!(out, "  dependencies:")?;
            for dependency in record.dependencies_added() {
                writeln!(out, "    {}", dependency)?;
            }
        }
        if !record.task_changes().is_empty() {
            writeln!(out, "  tasks:")?;
            for change in record.task_changes() {
                writeln!(out, "    {}", change)?;
            }
        }
    }
    writeln!(out)?;
    writeln!(out, "{}", FOOTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_core::ChangeRecord;

    #[test]
    fn test_render_blocks() {
        let report: Report = vec![
            ChangeRecord::plugin("org.sonarqube", "enabled"),
            ChangeRecord::new("bootJar", "bootJar disabled").with_task_change("jar enabled"),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        render(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "----- Keystone Report -----\n\
             \n\
             plugin org.sonarqube\n  enabled\n\
             \n\
             bootJar\n  bootJar disabled\n  tasks:\n    jar enabled\n\
             \n\
             ------- End Report -------\n"
        );
    }

    #[test]
    fn test_request_order() {
        let options = ReportOptions {
            sources: Sources::default(),
            defaults: true,
            uses: vec![Feature::Pitest],
            detect: true,
            plugins: Vec::new(),
            name: "app".to_string(),
            json: false,
        };

        assert_eq!(
            options.requests(vec![Feature::Sonar.into()]),
            vec![
                Feature::Sonar.into(),
                FeatureRequest::Detected,
                FeatureRequest::Defaults,
                Feature::Pitest.into(),
            ]
        );
    }
}
