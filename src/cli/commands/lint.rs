//! Lint command implementation.
//!
//! The `depcheck lint` command parses requirements without looking anything
//! up, listing the constraints or pointing at the first malformed line.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::LintArgs;
use crate::config::load_project_config;
use crate::error::{DepcheckError, Result};
use crate::requirements::parse_requirements;
use crate::ui::render_constraints;

use super::dispatcher::{Command, CommandOutput, CommandResult};
use super::input::resolve_requirements;

/// The lint command implementation.
pub struct LintCommand {
    project_root: PathBuf,
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: LintArgs,
}

impl LintCommand {
    /// Create a new lint command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: LintArgs) -> Self {
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
    pub fn args(&self) -> &LintArgs {
        &self.args
    }
}

impl Command for LintCommand {
    fn execute(&self, output: &mut CommandOutput<'_>) -> Result<CommandResult> {
        let config = load_project_config(&self.project_root, self.config_path.as_deref())?;
        let (text, _) = resolve_requirements(
            self.args.file.as_deref(),
            config.as_ref(),
            &self.project_root,
            &self.working_dir,
            &mut std::io::stdin().lock(),
        )?;

        let constraints = match parse_requirements(&text).to_vec() {
            Ok(constraints) => constraints,
            Err(e @ DepcheckError::MalformedRequirement { .. }) => {
                writeln!(output.err, "{}", output.theme.format_error(&e.to_string()))?;
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&constraints).map_err(anyhow::Error::from)?;
            writeln!(output.out, "{}", json)?;
        } else {
            writeln!(output.out, "{}", render_constraints(&constraints, &output.theme))?;
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::DepcheckTheme;
    use std::fs;
    use tempfile::TempDir;

    fn run(project: &Path, args: LintArgs) -> (CommandResult, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = {
            let mut output = CommandOutput {
                out: &mut out,
                err: &mut err,
                theme: DepcheckTheme::plain(),
            };
            LintCommand::new(project, None, args)
                .execute(&mut output)
                .unwrap()
        };
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn lists_parsed_constraints() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "numpy>=1.9\nscipy\n").unwrap();

        let (result, out, err) = run(temp.path(), LintArgs::default());
        assert!(result.success);
        assert!(err.is_empty());
        assert_eq!(out, "numpy >=1.9\nscipy (any version)\n");
    }

    #[test]
    fn reports_malformed_line() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "numpy\nscipy>=x\n").unwrap();

        let (result, out, err) = run(temp.path(), LintArgs::default());
        assert_eq!(result.exit_code, 1);
        assert!(out.is_empty());
        assert!(err.contains("line 2"));
        assert!(err.contains("scipy>=x"));
    }

    #[test]
    fn json_lists_constraints() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "pandas==0.19.2\n").unwrap();

        let args = LintArgs {
            json: true,
            ..Default::default()
        };
        let (result, out, _) = run(temp.path(), args);
        assert!(result.success);

        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc[0]["name"], "pandas");
        assert_eq!(doc[0]["requirement"]["operator"], "==");
        assert_eq!(doc[0]["requirement"]["version"], "0.19.2");
    }
}
