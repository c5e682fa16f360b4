//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// depcheck - Warn about missing or outdated dependencies.
#[derive(Debug, Parser)]
#[command(name = "depcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides discovered depcheck.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Verify installed packages against requirements (default)
    Check(CheckArgs),

    /// Parse requirements without checking anything
    Lint(LintArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    /// Requirement file ('-' reads stdin)
    pub file: Option<PathBuf>,

    /// Read installed versions from a YAML/JSON manifest instead of probing
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Flag passed to each binary when probing its version
    #[arg(
        long,
        env = "DEPCHECK_VERSION_FLAG",
        conflicts_with = "manifest",
        allow_hyphen_values = true
    )]
    pub version_flag: Option<String>,

    /// Exit with code 2 when any requirement is not satisfied
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Only print warnings
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `lint` command.
#[derive(Debug, Clone, Default, Args)]
pub struct LintArgs {
    /// Requirement file ('-' reads stdin)
    pub file: Option<PathBuf>,

    /// Output parsed constraints as JSON
    #[arg(long)]
    pub json: bool,
}
