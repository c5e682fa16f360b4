//! Requirement parsing and verification.
//!
//! This module turns requirement text into constraints and checks each one
//! against installed packages, reporting unmet constraints as warnings.
//!
//! # Modules
//!
//! - [`constraint`] - Constraint and operator types
//! - [`lookup`] - Installed-version lookups
//! - [`parser`] - Requirement text parsing
//! - [`sink`] - Warning channel
//! - [`status`] - Verification outcome types
//! - [`verifier`] - Constraint verification
//! - [`version`] - Numeric version ordering

pub mod constraint;
pub mod lookup;
pub mod parser;
pub mod sink;
pub mod status;
pub mod verifier;
pub mod version;

pub use constraint::{Constraint, Operator, VersionRequirement};
pub use lookup::{CommandLookup, InstalledPackages, LookupError, PackageLookup};
pub use parser::{parse_line, parse_requirements, Constraints, Requirements};
pub use sink::{CollectingSink, TracingSink, Warning, WarningSink, DEPENDENCY_CATEGORY};
pub use status::{CheckResult, Report, VerificationOutcome, Violation};
pub use verifier::{verify_packages, Verifier};
pub use version::{Version, VersionParseError};
