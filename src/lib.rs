//! depcheck - Warn about missing or outdated dependencies at startup.
//!
//! depcheck reads requirement text such as
//!
//! ```text
//! numpy>=1.9.0
//! scipy>0.14
//! setuptools
//! ```
//!
//! and checks every line against the installed packages. Unmet requirements
//! become warnings, not errors, so a host application can keep starting up.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and parsing
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Requirement parsing and verification
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use depcheck::requirements::{verify_packages, CollectingSink, InstalledPackages};
//!
//! let installed: InstalledPackages = [("package", "0.1.2")].into_iter().collect();
//! let mut sink = CollectingSink::new();
//!
//! verify_packages("package==0.1.2\npackage>0.1\npackage>=0.1", &installed, &mut sink).unwrap();
//! assert!(sink.is_empty());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod requirements;
pub mod ui;

pub use error::{DepcheckError, Result};
pub use requirements::{verify_packages, PackageLookup, Report, WarningSink};
