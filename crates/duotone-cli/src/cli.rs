//! Argument definitions for the `duotone` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use duotone::ColorMode;

/// Resolve style roles against a duotone theme table.
#[derive(Debug, Parser)]
#[command(name = "duotone")]
#[command(version)]
#[command(about = "Resolve style roles against a light/dark theme table")]
pub struct Cli {
    /// Theme table file or directory (defaults to the built-in table)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub table: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a role sequence to its final attributes
    Resolve(ResolveArgs),

    /// Validate a theme table
    Check,

    /// List the roles in a theme table
    Roles,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Display mode to resolve for
    #[arg(short, long, env = "DUOTONE_MODE", default_value = "light")]
    pub mode: ColorMode,

    /// Output representation
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Style)]
    pub format: OutputFormat,

    /// Roles in priority order; `a+b` and `a b` are also accepted
    #[arg(value_name = "ROLE", required = true)]
    pub roles: Vec<String>,
}

/// How resolved attributes are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Inline style text
    Style,
    /// Utility class names
    Classes,
    Json,
    Yaml,
}
