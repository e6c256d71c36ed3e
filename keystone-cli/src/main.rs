//! Keystone CLI - apply feature toggles to a build description and report
//! what changed.
//!
//! # Commands
//!
//! - `keystone report` - Apply the requested features and print the report
//! - `keystone features` - List the features that can be requested
//! - `keystone config` - Show the assembled configuration

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use keystone_config::Feature;
use std::path::PathBuf;

mod commands;
mod error;

use commands::{config, features, report};
use error::CliResult;

/// Keystone CLI - feature toggle composition for builds
#[derive(Parser)]
#[command(name = "keystone")]
#[command(version)]
#[command(about = "Apply \"use X\" feature toggles to a build and report what changed")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} keystone report --defaults --web-flux\n  {} keystone report --plugin org.jetbrains.kotlin.jvm --detect\n  {} keystone report -c gradle.properties --format json\n  {} keystone features",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply features and print the change report
    #[command(alias = "r")]
    Report(ReportArgs),

    /// List the features that can be requested
    #[command(alias = "f", visible_alias = "list")]
    Features(FeaturesArgs),

    /// Show the assembled configuration
    #[command(alias = "c")]
    Config(ConfigArgs),
}

// =============================================================================
// SHARED ARGS
// =============================================================================

/// Configuration sources, applied in order after the built-in defaults.
#[derive(Args)]
struct SourceArgs {
    /// Configuration file (.toml, .json, .properties); repeatable, later files win
    #[arg(short, long = "config", value_name = "FILE")]
    configs: Vec<PathBuf>,

    /// Override an option, e.g. `features.web_flux=true`; repeatable
    #[arg(short, long = "set", value_name = "OPTION=VALUE", value_parser = parse_assignment)]
    sets: Vec<(String, String)>,

    /// Ignore KEYSTONE_* option variables
    #[arg(long)]
    no_env: bool,

    /// Use the reactive web stack
    #[arg(long)]
    web_flux: bool,

    /// Enable executable archive packaging
    #[arg(long)]
    boot_jar: bool,

    /// Add spring devtools when packaging is enabled
    #[arg(long)]
    dev_tools: bool,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(option, value)| (option.trim().to_string(), value.to_string()))
        .filter(|(option, _)| !option.is_empty())
        .ok_or_else(|| format!("expected OPTION=VALUE, got '{}'", raw))
}

impl SourceArgs {
    fn into_sources(self) -> config::Sources {
        let mut sets = self.sets;
        for (flag, path) in [
            (self.web_flux, "features.web_flux"),
            (self.boot_jar, "features.boot_jar"),
            (self.dev_tools, "features.dev_tools"),
        ] {
            if flag {
                sets.push((path.to_string(), "true".to_string()));
            }
        }

        config::Sources {
            files: self.configs,
            env: !self.no_env,
            sets,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

// =============================================================================
// COMMAND ARGS
// =============================================================================

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Apply the default feature set
    #[arg(short, long)]
    defaults: bool,

    /// Apply a feature; repeatable, applied in order
    #[arg(short = 'u', long = "use", value_name = "FEATURE")]
    uses: Vec<Feature>,

    /// Apply features for capabilities the project already has
    #[arg(long)]
    detect: bool,

    /// Capability the project already has; repeatable
    #[arg(short, long = "plugin", value_name = "ID")]
    plugins: Vec<String>,

    /// Project name shown in the report
    #[arg(long, default_value = "project")]
    name: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Args)]
struct FeaturesArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Args)]
struct ConfigArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Print as JSON instead of TOML
    #[arg(long)]
    json: bool,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    keystone_log::init();
    if cli.verbose {
        keystone_log::set_debug(true);
    } else if cli.quiet {
        keystone_log::set_level(keystone_log::Level::Warn);
    }

    let result: CliResult<()> = match cli.command {
        Commands::Report(args) => report::execute(report::ReportOptions {
            sources: args.sources.into_sources(),
            defaults: args.defaults,
            uses: args.uses,
            detect: args.detect,
            plugins: args.plugins,
            name: args.name,
            json: matches!(args.format, OutputFormat::Json),
        }),
        Commands::Features(args) => features::execute(matches!(args.format, OutputFormat::Json)),
        Commands::Config(args) => config::execute(args.sources.into_sources(), args.json),
    };

    if let Err(e) = result {
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    };
}
