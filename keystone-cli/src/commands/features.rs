//! Features command - list what can be requested.

use crate::error::CliResult;
use colored::Colorize;
use keystone_config::Feature;
use keystone_features::capabilities;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct FeatureEntry {
    name: &'static str,
    summary: &'static str,
    capability: Option<&'static str>,
    requires: Option<&'static str>,
    default: bool,
}

fn entries() -> Vec<FeatureEntry> {
    let defaults = default_features();
    Feature::ALL
        .into_iter()
        .map(|feature| FeatureEntry {
            name: feature.name(),
            summary: feature.summary(),
            capability: capabilities::of(feature),
            requires: feature.prerequisite().map(|f| f.name()),
            default: defaults.contains(&feature),
        })
        .collect()
}

/// Features applied by the default request, flattened.
fn default_features() -> Vec<Feature> {
    use keystone_features::FeatureRequest;

    fn walk(request: &FeatureRequest, out: &mut Vec<Feature>) {
        if let FeatureRequest::Use { feature, nested } = request {
            out.push(*feature);
            for request in nested {
                walk(request, out);
            }
        }
    }

    let mut out = Vec::new();
    for request in FeatureRequest::defaults() {
        walk(&request, &mut out);
    }
    out
}

pub fn execute(json: bool) -> CliResult<()> {
    let entries = entries();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!();
    println!("  {}", "Features:".bright_white().bold());
    for entry in &entries {
        let marker = if entry.default {
            "●".green()
        } else {
            "○".dimmed()
        };
        let requires = entry
            .requires
            .map(|name| format!(" (after {})", name))
            .unwrap_or_default();
        println!(
            "    {} {:<15} {}{}",
            marker,
            entry.name.cyan(),
            entry.summary,
            requires.dimmed()
        );
    }
    println!();
    println!("  {} applied by --defaults", "●".green());
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markers() {
        let entries = entries();
        let defaults: Vec<&str> = entries
            .iter()
            .filter(|e| e.default)
            .map(|e| e.name)
            .collect();

        assert_eq!(defaults.len(), 9);
        assert!(!defaults.contains(&"pitest"));
        assert!(!defaults.contains(&"asciidoctor"));
    }
}
