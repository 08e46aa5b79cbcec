//! CLI argument definitions using clap derive API

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Riser - bring a database schema up to date from a versioned script bundle
#[derive(Parser, Debug)]
#[command(name = "riser")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full migration sequence against the target database
    Migrate(MigrateArgs),

    /// Show applied scripts and database metadata
    Status(StatusArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Overrides in key:value form: db:<connection-string>, v:<version>
    pub overrides: Vec<String>,

    /// Output format for the outcome
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Overrides in key:value form: db:<connection-string>
    pub overrides: Vec<String>,
}

/// Outcome output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON outcome object
    Json,
}

/// Invocation-time overrides parsed from positional `key:value` arguments
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Replacement connection string (`db:`)
    pub connection: Option<String>,
    /// Build-version identifier recorded on success (`v:`)
    pub build_version: Option<String>,
}

/// Parse positional overrides of the form `db:<connection>` / `v:<version>`.
///
/// An argument without a `:`, with an empty value, or with an unknown key
/// is an error rather than being silently ignored.
pub fn parse_overrides(args: &[String]) -> Result<Overrides> {
    let mut overrides = Overrides::default();
    for arg in args {
        let Some((key, value)) = arg.split_once(':') else {
            bail!("unrecognizable argument '{arg}', expected key:value");
        };
        if value.is_empty() {
            bail!("no parameter supplied for argument '{key}:'");
        }
        match key {
            "db" => overrides.connection = Some(value.to_string()),
            "v" => overrides.build_version = Some(value.to_string()),
            _ => bail!("unknown argument key '{key}'"),
        }
    }
    Ok(overrides)
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
