//! Requirement text resolution shared by commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::{read_requirements_file, LoadedConfig};
use crate::error::{DepcheckError, Result};

/// Conventional requirement file looked for when nothing else is given.
pub const DEFAULT_REQUIREMENTS_FILE: &str = "requirements.txt";

/// Where the requirement text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementSource {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
    /// The `requirements`/`requirements_file` config fields
    Config(PathBuf),
}

/// Resolve a path given on the command line.
///
/// Relative paths are taken from `working_dir`, not the project root.
pub fn resolve_cli_path(path: &Path, working_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    }
}

/// Resolve requirement text.
///
/// Precedence: explicit `file` (`-` is stdin, relative to `working_dir`),
/// then the config, then `requirements.txt` in the project root.
pub fn resolve_requirements(
    file: Option<&Path>,
    config: Option<&LoadedConfig>,
    project_root: &Path,
    working_dir: &Path,
    stdin: &mut dyn Read,
) -> Result<(String, RequirementSource)> {
    if let Some(file) = file {
        if file == Path::new("-") {
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            return Ok((text, RequirementSource::Stdin));
        }
        let path = resolve_cli_path(file, working_dir);
        let text = read_requirements_file(&path)?;
        return Ok((text, RequirementSource::File(path)));
    }

    if let Some(loaded) = config {
        if let Some(text) = loaded.requirement_text()? {
            return Ok((text, RequirementSource::Config(loaded.path.clone())));
        }
    }

    let fallback = project_root.join(DEFAULT_REQUIREMENTS_FILE);
    if fallback.is_file() {
        let text = read_requirements_file(&fallback)?;
        return Ok((text, RequirementSource::File(fallback)));
    }

    Err(DepcheckError::ConfigValidationError {
        message: format!(
            "no requirements given: pass a file, set 'requirements' in depcheck.yml, or add {}",
            DEFAULT_REQUIREMENTS_FILE
        ),
    })
}
