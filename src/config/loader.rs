//! Configuration file discovery and loading.
//!
//! A project keeps its configuration in `depcheck.yml` (or `depcheck.yaml`)
//! at the project root, or in `.depcheck/config.yml`. Relative paths inside
//! the file resolve against the directory that holds it.

use crate::config::schema::{DepcheckConfig, LookupConfig};
use crate::error::{DepcheckError, Result};
use crate::requirements::{CommandLookup, InstalledPackages, PackageLookup};
use std::fs;
use std::path::{Path, PathBuf};

/// Config locations checked in order; the first existing one wins.
const CONFIG_CANDIDATES: &[&str] = &["depcheck.yml", "depcheck.yaml", ".depcheck/config.yml"];

/// A parsed config file and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: DepcheckConfig,
    /// Path of the file it was read from
    pub path: PathBuf,
}

impl LoadedConfig {
    /// Directory that relative paths resolve against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Resolve a path from the config against [`LoadedConfig::base_dir`].
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Requirement text from `requirements` or `requirements_file`.
    ///
    /// Returns `None` when the config declares neither.
    pub fn requirement_text(&self) -> Result<Option<String>> {
        if let Some(text) = &self.config.requirements {
            return Ok(Some(text.clone()));
        }
        match &self.config.requirements_file {
            Some(file) => read_requirements_file(&self.resolve(file)).map(Some),
            None => Ok(None),
        }
    }

    /// Build the lookup the config asks for.
    pub fn build_lookup(&self) -> Result<Box<dyn PackageLookup>> {
        match &self.config.lookup {
            LookupConfig::Command { version_flag } => {
                Ok(Box::new(CommandLookup::new(version_flag.clone())))
            }
            LookupConfig::Manifest { path } => Ok(Box::new(InstalledPackages::from_manifest(
                &self.resolve(path),
            )?)),
        }
    }
}

/// Find the config file for a project root.
pub fn find_config(project_root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| project_root.join(candidate))
        .find(|path| path.is_file())
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. A depcheck config file (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if find_config(&current).is_some() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into DepcheckConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
/// Returns `ConfigValidationError` if the fields contradict each other.
pub fn load_config_file(path: &Path) -> Result<DepcheckConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DepcheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DepcheckError::Io(e)
        }
    })?;

    let config = parse_config(&content, path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse YAML content into DepcheckConfig.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DepcheckConfig> {
    // An empty file is a valid, default config.
    if content.trim().is_empty() {
        return Ok(DepcheckConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| DepcheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Check field combinations serde cannot express.
pub fn validate(config: &DepcheckConfig) -> Result<()> {
    if config.requirements.is_some() && config.requirements_file.is_some() {
        return Err(DepcheckError::ConfigValidationError {
            message: "set either 'requirements' or 'requirements_file', not both".to_string(),
        });
    }
    if let LookupConfig::Command { version_flag } = &config.lookup {
        if version_flag.trim().is_empty() {
            return Err(DepcheckError::ConfigValidationError {
                message: "'lookup.version_flag' must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

/// Load the project's config.
///
/// An explicit path must exist. Without one, the project root is searched
/// and `Ok(None)` means no config was found.
pub fn load_project_config(
    project_root: &Path,
    explicit: Option<&Path>,
) -> Result<Option<LoadedConfig>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_config(project_root) {
            Some(path) => path,
            None => {
                tracing::debug!("No config found under {}", project_root.display());
                return Ok(None);
            }
        },
    };

    tracing::debug!("Loading config from {}", path.display());
    let config = load_config_file(&path)?;
    Ok(Some(LoadedConfig { config, path }))
}

/// Read requirement text from a file.
pub fn read_requirements_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DepcheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DepcheckError::Io(e)
        }
    })
}
