//! Installed-version lookup.
//!
//! The verifier never discovers packages itself; it asks a
//! [`PackageLookup`] for the installed version of each name. Two lookups
//! ship with the crate:
//!
//! - [`InstalledPackages`] - an in-memory table, optionally loaded from a
//!   YAML or JSON manifest
//! - [`CommandLookup`] - runs `<name> --version` and reads the version from
//!   its output
//!
//! Any `Fn(&str) -> Result<String, LookupError>` is also a lookup, which
//! keeps test doubles short.

use crate::error::{DepcheckError, Result};
use crate::requirements::version::Version;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Why a lookup produced no version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The package is not installed.
    #[error("package '{name}' not found")]
    NotFound { name: String },

    /// The package could not be inspected.
    #[error("failed to look up '{name}': {message}")]
    Failed { name: String, message: String },
}

impl LookupError {
    /// Shorthand for [`LookupError::NotFound`].
    pub fn not_found(name: impl Into<String>) -> Self {
        LookupError::NotFound { name: name.into() }
    }
}

/// Source of installed package versions.
pub trait PackageLookup {
    /// Installed version of `name`, as reported by the source.
    fn installed_version(&self, name: &str) -> std::result::Result<String, LookupError>;
}

impl<F> PackageLookup for F
where
    F: Fn(&str) -> std::result::Result<String, LookupError>,
{
    fn installed_version(&self, name: &str) -> std::result::Result<String, LookupError> {
        self(name)
    }
}

/// In-memory table of installed packages.
///
/// Names are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    versions: HashMap<String, String>,
}

impl InstalledPackages {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as installed at `version`.
    pub fn insert(&mut self, name: impl AsRef<str>, version: impl Into<String>) {
        self.versions
            .insert(name.as_ref().to_lowercase(), version.into());
    }

    /// Number of recorded packages.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether no packages are recorded.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Load a manifest mapping package names to versions.
    ///
    /// Files ending in `.json` are read as JSON, everything else as YAML.
    /// Versions should be quoted in YAML; bare numbers are accepted but
    /// `1.10` reads as the float `1.1`.
    pub fn from_manifest(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DepcheckError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DepcheckError::Io(e)
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let raw: HashMap<String, serde_yaml::Value> = if is_json {
            serde_json::from_str(&content).map_err(|e| DepcheckError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| DepcheckError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        let mut packages = Self::new();
        for (name, value) in raw {
            let version = match value {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                other => {
                    return Err(DepcheckError::ConfigParseError {
                        path: path.to_path_buf(),
                        message: format!("version of '{}' must be a string, got {:?}", name, other),
                    })
                }
            };
            packages.insert(name, version);
        }

        tracing::debug!(
            "Loaded {} installed packages from {}",
            packages.len(),
            path.display()
        );
        Ok(packages)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for InstalledPackages {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut packages = Self::new();
        for (name, version) in iter {
            packages.insert(name, version);
        }
        packages
    }
}

impl PackageLookup for InstalledPackages {
    fn installed_version(&self, name: &str) -> std::result::Result<String, LookupError> {
        self.versions
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| LookupError::not_found(name))
    }
}

/// Looks up tools by running `<name> <version_flag>`.
///
/// A binary that cannot be found on `PATH` is [`LookupError::NotFound`].
/// The version is the first dotted number in stdout, falling back to
/// stderr for tools that print their banner there.
#[derive(Debug, Clone)]
pub struct CommandLookup {
    version_flag: String,
}

impl Default for CommandLookup {
    fn default() -> Self {
        Self::new("--version")
    }
}

impl CommandLookup {
    /// Create a lookup passing `version_flag` to every probed binary.
    pub fn new(version_flag: impl Into<String>) -> Self {
        Self {
            version_flag: version_flag.into(),
        }
    }

    /// The flag passed to probed binaries.
    pub fn version_flag(&self) -> &str {
        &self.version_flag
    }
}

impl PackageLookup for CommandLookup {
    fn installed_version(&self, name: &str) -> std::result::Result<String, LookupError> {
        let output = match Command::new(name).arg(&self.version_flag).output() {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LookupError::not_found(name));
            }
            Err(e) => {
                return Err(LookupError::Failed {
                    name: name.to_string(),
                    message: e.to_string(),
                });
            }
        };

        if !output.status.success() {
            return Err(LookupError::Failed {
                name: name.to_string(),
                message: format!(
                    "'{} {}' exited with {}",
                    name, self.version_flag, output.status
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        Version::extract(&stdout)
            .or_else(|| Version::extract(&stderr))
            .map(|v| v.as_str().to_string())
            .ok_or_else(|| LookupError::Failed {
                name: name.to_string(),
                message: "no version found in output".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn installed_packages_match_case_insensitively() {
        let mut packages = InstalledPackages::new();
        packages.insert("NumPy", "1.9.0");
        assert_eq!(packages.installed_version("numpy").unwrap(), "1.9.0");
        assert_eq!(packages.installed_version("NUMPY").unwrap(), "1.9.0");
    }

    #[test]
    fn installed_packages_report_not_found() {
        let packages = InstalledPackages::new();
        assert_eq!(
            packages.installed_version("scipy"),
            Err(LookupError::not_found("scipy"))
        );
    }

    #[test]
    fn installed_packages_collect_from_pairs() {
        let packages: InstalledPackages = [("a", "1"), ("b", "2.0")].into_iter().collect();
        assert_eq!(packages.len(), 2);
        assert!(!packages.is_empty());
        assert_eq!(packages.installed_version("b").unwrap(), "2.0");
    }

    #[test]
    fn closures_are_lookups() {
        let lookup = |name: &str| -> std::result::Result<String, LookupError> {
            if name == "present" {
                Ok("1.0".to_string())
            } else {
                Err(LookupError::not_found(name))
            }
        };
        assert_eq!(lookup.installed_version("present").unwrap(), "1.0");
        assert!(lookup.installed_version("absent").is_err());
    }

    #[test]
    fn manifest_loads_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("installed.yml");
        fs::write(&path, "numpy: \"1.10.0\"\nscipy: 2\n").unwrap();

        let packages = InstalledPackages::from_manifest(&path).unwrap();
        assert_eq!(packages.installed_version("numpy").unwrap(), "1.10.0");
        assert_eq!(packages.installed_version("scipy").unwrap(), "2");
    }

    #[test]
    fn manifest_loads_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("installed.json");
        fs::write(&path, r#"{"pandas": "0.19.2"}"#).unwrap();

        let packages = InstalledPackages::from_manifest(&path).unwrap();
        assert_eq!(packages.installed_version("pandas").unwrap(), "0.19.2");
    }

    #[test]
    fn manifest_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = InstalledPackages::from_manifest(&temp.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, DepcheckError::ConfigNotFound { .. }));
    }

    #[test]
    fn manifest_rejects_non_scalar_versions() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("installed.yml");
        fs::write(&path, "numpy:\n  - 1\n").unwrap();

        let err = InstalledPackages::from_manifest(&path).unwrap_err();
        assert!(matches!(err, DepcheckError::ConfigParseError { .. }));
    }

    #[test]
    fn command_lookup_missing_binary_is_not_found() {
        let lookup = CommandLookup::default();
        assert_eq!(lookup.version_flag(), "--version");
        let result = lookup.installed_version("depcheck-definitely-not-a-real-binary");
        assert_eq!(
            result,
            Err(LookupError::not_found("depcheck-definitely-not-a-real-binary"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn command_lookup_extracts_version_from_output() {
        // `echo <flag>` prints the flag back, standing in for a version banner
        let lookup = CommandLookup::new("fake-tool version 3.2.1 (build 7)");
        assert_eq!(lookup.installed_version("echo").unwrap(), "3.2.1");
    }

    #[cfg(unix)]
    #[test]
    fn command_lookup_output_without_version_is_failed() {
        let lookup = CommandLookup::new("no digits here");
        assert!(matches!(
            lookup.installed_version("echo"),
            Err(LookupError::Failed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn command_lookup_failing_command_is_failed() {
        let result = CommandLookup::new("x").installed_version("false");
        assert!(matches!(result, Err(LookupError::Failed { .. })));
    }
}
