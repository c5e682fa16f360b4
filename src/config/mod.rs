//! Configuration loading and parsing for depcheck.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery, loading and validation in [`loader`]
//!
//! # Example
//!
//! ```
//! use depcheck::config::load_project_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("depcheck.yml"), "requirements: numpy>=1.9\n").unwrap();
//!
//! let loaded = load_project_config(temp.path(), None).unwrap().unwrap();
//! assert_eq!(loaded.requirement_text().unwrap().as_deref(), Some("numpy>=1.9"));
//! ```
//!
//! # Configuration File Locations
//!
//! The first of these found in the project root is used:
//! 1. `depcheck.yml`
//! 2. `depcheck.yaml`
//! 3. `.depcheck/config.yml`

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, find_project_root, load_config_file, load_project_config, parse_config,
    read_requirements_file, validate, LoadedConfig,
};
pub use schema::{DepcheckConfig, LookupConfig};
