//! Verification outcome types.
//!
//! Each constraint check produces a [`VerificationOutcome`]. A run over a
//! whole requirement text produces a [`Report`].

use crate::requirements::constraint::{Constraint, Operator};
use crate::requirements::version::Version;
use serde::Serialize;

/// Why a constraint was not met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The lookup did not find the package.
    MissingPackage,

    /// The package is installed but fails the version comparison.
    VersionMismatch {
        /// Installed version as reported by the lookup.
        installed: String,
        /// Operator of the failed comparison.
        operator: Operator,
        /// Version on the right-hand side.
        required: Version,
    },
}

impl Violation {
    /// The warning text for this violation of `package`.
    pub fn message(&self, package: &str) -> String {
        match self {
            Violation::MissingPackage => {
                format!("mandatory package '{}' not found", package)
            }
            Violation::VersionMismatch {
                operator, required, ..
            } => format!("'{}' version mismatch ({}{})", package, operator, required),
        }
    }
}

/// The result of checking a single constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "violation", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Installed and, if compared, at an acceptable version.
    Satisfied,
    /// Not met.
    Violation(Violation),
}

impl VerificationOutcome {
    /// Whether the constraint is met.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, VerificationOutcome::Satisfied)
    }

    /// The violation, if any.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            VerificationOutcome::Satisfied => None,
            VerificationOutcome::Violation(v) => Some(v),
        }
    }
}

/// A constraint together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// The constraint that was checked
    pub constraint: Constraint,
    /// What the check found
    pub outcome: VerificationOutcome,
}

impl CheckResult {
    /// The warning text, if the constraint was not met.
    pub fn warning(&self) -> Option<String> {
        self.outcome
            .violation()
            .map(|v| v.message(&self.constraint.name))
    }
}

/// Outcomes of a verification run, in constraint order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    results: Vec<CheckResult>,
}

impl Report {
    /// Build a report from results.
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self { results }
    }

    /// Every result in constraint order.
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Results that were not met.
    pub fn violations(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.outcome.is_satisfied())
    }

    /// Number of unmet constraints.
    pub fn violation_count(&self) -> usize {
        self.violations().count()
    }

    /// Whether every constraint was met.
    pub fn is_satisfied(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_satisfied())
    }

    /// Number of constraints checked.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no constraints were checked.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
