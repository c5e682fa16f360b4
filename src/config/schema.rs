//! Configuration schema definitions for depcheck.
//!
//! This module contains the structs that map to the `depcheck.yml` file
//! format:
//!
//! ```yaml
//! requirements: |
//!   numpy>=1.9
//!   scipy
//! lookup:
//!   kind: manifest
//!   path: installed.yml
//! strict: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for depcheck.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DepcheckConfig {
    /// Inline requirement text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,

    /// Requirement file, relative to the config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements_file: Option<PathBuf>,

    /// Where installed versions come from
    pub lookup: LookupConfig,

    /// Treat violations as failures (non-zero exit)
    #[serde(skip_serializing_if = "is_false")]
    pub strict: bool,
}

/// Installed-version source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupConfig {
    /// Run `<name> <version_flag>` for every package
    Command {
        #[serde(default = "default_version_flag")]
        version_flag: String,
    },

    /// Read a name → version manifest, relative to the config file
    Manifest { path: PathBuf },
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig::Command {
            version_flag: default_version_flag(),
        }
    }
}

fn default_version_flag() -> String {
    "--version".to_string()
}

fn is_false(b: &bool) -> bool {
    !b
}
