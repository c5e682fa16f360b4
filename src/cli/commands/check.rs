//! Check command implementation.
//!
//! The `depcheck check` command verifies installed packages against the
//! requirements and prints a warning for each unmet one.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::config::{load_project_config, LoadedConfig};
use crate::error::Result;
use crate::requirements::{
    CheckResult, CollectingSink, CommandLookup, InstalledPackages, PackageLookup, Verifier,
    Warning,
};
use crate::ui::{render_report, TerminalSink};

use super::dispatcher::{Command, CommandOutput, CommandResult};
use super::input::{resolve_cli_path, resolve_requirements};

/// Exit code for `--strict` runs with unmet requirements.
pub const STRICT_FAILURE_EXIT_CODE: i32 = 2;

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: CheckArgs,
}

/// JSON document printed by `check --json`.
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    satisfied: bool,
    results: &'a [CheckResult],
    warnings: &'a [Warning],
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            working_dir: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Directory that relative paths given on the command line start from.
    pub fn with_working_dir(mut self, working_dir: &Path) -> Self {
        self.working_dir = working_dir.to_path_buf();
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Flags win over the config; with neither, probe binaries.
    fn build_lookup(&self, config: Option<&LoadedConfig>) -> Result<Box<dyn PackageLookup>> {
        if let Some(manifest) = &self.args.manifest {
            let path = resolve_cli_path(manifest, &self.working_dir);
            return Ok(Box::new(InstalledPackages::from_manifest(&path)?));
        }
        if let Some(flag) = &self.args.version_flag {
            return Ok(Box::new(CommandLookup::new(flag.clone())));
        }
        match config {
            Some(loaded) => loaded.build_lookup(),
            None => Ok(Box::new(CommandLookup::default())),
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, output: &mut CommandOutput<'_>) -> Result<CommandResult> {
        let config = load_project_config(&self.project_root, self.config_path.as_deref())?;
        let (text, source) = resolve_requirements(
            self.args.file.as_deref(),
            config.as_ref(),
            &self.project_root,
            &self.working_dir,
            &mut std::io::stdin().lock(),
        )?;
        tracing::debug!("Checking requirements from {:?}", source);

        let lookup = self.build_lookup(config.as_ref())?;
        let verifier = Verifier::new(&*lookup);
        let strict = self.args.strict || config.as_ref().is_some_and(|c| c.config.strict);

        let report = if self.args.json {
            let mut sink = CollectingSink::new();
            let report = verifier.verify_packages(&text, &mut sink)?;
            let doc = CheckOutput {
                satisfied: report.is_satisfied(),
                results: report.results(),
                warnings: sink.warnings(),
            };
            let json = serde_json::to_string_pretty(&doc).map_err(anyhow::Error::from)?;
            writeln!(output.out, "{}", json)?;
            report
        } else {
            let mut sink = TerminalSink::new(&mut *output.err, output.theme.clone());
            let report = verifier.verify_packages(&text, &mut sink)?;
            if !self.args.quiet {
                writeln!(output.out, "{}", render_report(&report, &output.theme))?;
            }
            report
        };

        if strict && !report.is_satisfied() {
            Ok(CommandResult::failure(STRICT_FAILURE_EXIT_CODE))
        } else {
            Ok(CommandResult::success())
        }
    }
}
