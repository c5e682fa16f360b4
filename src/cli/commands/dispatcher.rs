//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::error::Result;
use crate::ui::DepcheckTheme;

/// Where a command writes and how it styles what it writes.
pub struct CommandOutput<'a> {
    /// Results (reports, JSON).
    pub out: &'a mut dyn Write,
    /// Warnings and diagnostics.
    pub err: &'a mut dyn Write,
    /// Styling for terminal output.
    pub theme: DepcheckTheme,
}

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, output: &mut CommandOutput<'_>) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self {
            working_dir: project_root.clone(),
            project_root,
            config_path,
        }
    }

    /// Set the directory relative command-line paths are resolved from.
    pub fn with_working_dir(mut self, working_dir: PathBuf) -> Self {
        self.working_dir = working_dir;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, output: &mut CommandOutput<'_>) -> Result<CommandResult> {
        let config = self.config_path.as_deref();
        match &cli.command {
            Some(Commands::Check(args)) => {
                let cmd = super::check::CheckCommand::new(&self.project_root, config, args.clone())
                    .with_working_dir(&self.working_dir);
                cmd.execute(output)
            }
            Some(Commands::Lint(args)) => {
                let cmd = super::lint::LintCommand::new(&self.project_root, config, args.clone())
                    .with_working_dir(&self.working_dir);
                cmd.execute(output)
            }
            None => {
                // Default to check command with default args
                let cmd =
                    super::check::CheckCommand::new(&self.project_root, config, CheckArgs::default())
                        .with_working_dir(&self.working_dir);
                cmd.execute(output)
            }
        }
    }
}
