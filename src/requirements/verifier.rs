//! Constraint verification.
//!
//! The [`Verifier`] looks up each constraint's package, compares versions
//! and reports unmet constraints to a [`WarningSink`]. Missing packages and
//! version mismatches never stop the run; only malformed requirement text
//! is returned as an error.

use crate::error::Result;
use crate::requirements::constraint::Constraint;
use crate::requirements::lookup::{LookupError, PackageLookup};
use crate::requirements::parser::parse_requirements;
use crate::requirements::sink::{WarningSink, DEPENDENCY_CATEGORY};
use crate::requirements::status::{CheckResult, Report, VerificationOutcome, Violation};
use crate::requirements::version::Version;

/// Checks constraints against installed packages.
pub struct Verifier<'a> {
    lookup: &'a dyn PackageLookup,
}

impl<'a> Verifier<'a> {
    /// Create a verifier backed by `lookup`.
    pub fn new(lookup: &'a dyn PackageLookup) -> Self {
        Self { lookup }
    }

    /// Parse `text` and verify every constraint in it.
    ///
    /// The whole text is parsed before any lookup, so a malformed line
    /// fails the call without emitting warnings for the lines around it.
    pub fn verify_packages(&self, text: &str, sink: &mut dyn WarningSink) -> Result<Report> {
        let constraints = parse_requirements(text).to_vec()?;
        Ok(self.verify_all(constraints, sink))
    }

    /// Verify constraints in order, emitting one warning per unmet constraint.
    pub fn verify_all<I>(&self, constraints: I, sink: &mut dyn WarningSink) -> Report
    where
        I: IntoIterator<Item = Constraint>,
    {
        let results = constraints
            .into_iter()
            .map(|constraint| {
                let outcome = self.verify(&constraint);
                let result = CheckResult {
                    constraint,
                    outcome,
                };
                if let Some(message) = result.warning() {
                    sink.emit(DEPENDENCY_CATEGORY, &message);
                }
                result
            })
            .collect();
        Report::new(results)
    }

    /// Evaluate a single constraint without reporting it.
    pub fn verify(&self, constraint: &Constraint) -> VerificationOutcome {
        let installed = match self.lookup.installed_version(&constraint.name) {
            Ok(version) => version,
            Err(LookupError::NotFound { .. }) => {
                tracing::debug!("'{}' is not installed", constraint.name);
                return VerificationOutcome::Violation(Violation::MissingPackage);
            }
            Err(e) => {
                tracing::debug!("Treating '{}' as missing: {}", constraint.name, e);
                return VerificationOutcome::Violation(Violation::MissingPackage);
            }
        };

        let Some(requirement) = &constraint.requirement else {
            tracing::debug!("'{}' found at {}", constraint.name, installed);
            return VerificationOutcome::Satisfied;
        };

        // An installed version with no digits cannot meet any comparison.
        let satisfied = Version::extract(&installed).is_some_and(|v| requirement.matches(&v));
        tracing::debug!(
            "'{}' installed {} {} {}",
            constraint.name,
            installed,
            if satisfied { "satisfies" } else { "fails" },
            requirement
        );

        if satisfied {
            VerificationOutcome::Satisfied
        } else {
            VerificationOutcome::Violation(Violation::VersionMismatch {
                installed,
                operator: requirement.operator,
                required: requirement.version.clone(),
            })
        }
    }
}

/// Verify requirement text against `lookup`, reporting to `sink`.
///
/// # Example
///
/// ```
/// use depcheck::requirements::{verify_packages, CollectingSink, InstalledPackages};
///
/// let installed: InstalledPackages = [("numpy", "1.8.2")].into_iter().collect();
/// let mut sink = CollectingSink::new();
///
/// let report = verify_packages("numpy>=1.9\nscipy", &installed, &mut sink).unwrap();
///
/// assert_eq!(report.violation_count(), 2);
/// assert_eq!(
///     sink.messages(),
///     [
///         "'numpy' version mismatch (>=1.9)",
///         "mandatory package 'scipy' not found",
///     ]
/// );
/// ```
pub fn verify_packages(
    text: &str,
    lookup: &dyn PackageLookup,
    sink: &mut dyn WarningSink,
) -> Result<Report> {
    Verifier::new(lookup).verify_packages(text, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DepcheckError;
    use crate::requirements::constraint::Operator;
    use crate::requirements::lookup::InstalledPackages;
    use crate::requirements::sink::CollectingSink;
    use std::cell::RefCell;

    /// Lookup double that records every name it is asked for.
    struct RecordingLookup {
        version: Option<String>,
        calls: RefCell<Vec<String>>,
    }

    impl RecordingLookup {
        fn installed(version: &str) -> Self {
            Self {
                version: Some(version.to_string()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn missing() -> Self {
            Self {
                version: None,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl PackageLookup for RecordingLookup {
        fn installed_version(&self, name: &str) -> std::result::Result<String, LookupError> {
            self.calls.borrow_mut().push(name.to_string());
            self.version
                .clone()
                .ok_or_else(|| LookupError::not_found(name))
        }
    }

    fn run(text: &str, lookup: &dyn PackageLookup) -> (Report, CollectingSink) {
        let mut sink = CollectingSink::new();
        let report = verify_packages(text, lookup, &mut sink).unwrap();
        (report, sink)
    }

    #[test]
    fn existing_package_emits_nothing() {
        let lookup = RecordingLookup::installed("0.0.1");
        let (report, sink) = run("package", &lookup);
        assert!(sink.is_empty());
        assert!(report.is_satisfied());
        assert_eq!(lookup.calls(), ["package"]);
    }

    #[test]
    fn bare_name_ignores_installed_version_text() {
        let lookup = RecordingLookup::installed("not-a-version");
        let (_, sink) = run("package", &lookup);
        assert!(sink.is_empty());
    }

    #[test]
    fn missing_package_warns_once() {
        let lookup = RecordingLookup::missing();
        let (report, sink) = run("package", &lookup);
        assert_eq!(sink.messages(), ["mandatory package 'package' not found"]);
        assert_eq!(sink.warnings()[0].category, "dependency");
        assert_eq!(
            report.results()[0].outcome,
            VerificationOutcome::Violation(Violation::MissingPackage)
        );
    }

    #[test]
    fn missing_package_with_version_clause_warns_not_found() {
        let lookup = RecordingLookup::missing();
        let (_, sink) = run("package>=1.0", &lookup);
        assert_eq!(sink.messages(), ["mandatory package 'package' not found"]);
    }

    #[test]
    fn correct_versions_emit_nothing() {
        let lookup = RecordingLookup::installed("0.1.2");
        let (report, sink) = run("package==0.1.2\npackage>0.1\npackage>=0.1", &lookup);
        assert!(sink.is_empty());
        assert_eq!(report.len(), 3);
        assert_eq!(lookup.calls(), ["package", "package", "package"]);
    }

    #[test]
    fn wrong_version_warns() {
        let lookup = RecordingLookup::installed("0.1.2");
        let (_, sink) = run("package>0.1.2", &lookup);
        assert_eq!(sink.messages(), ["'package' version mismatch (>0.1.2)"]);
    }

    #[test]
    fn outdated_version_warns() {
        let lookup = RecordingLookup::installed("0.0.9");
        let (_, sink) = run("package>=0.1", &lookup);
        assert_eq!(sink.messages(), ["'package' version mismatch (>=0.1)"]);
    }

    #[test]
    fn too_fresh_version_warns() {
        let lookup = RecordingLookup::installed("0.1.3");
        let (report, sink) = run("package==0.1.2", &lookup);
        assert_eq!(sink.len(), 1);
        assert!(sink.messages()[0].contains("mismatch (==0.1.2)"));

        match report.results()[0].outcome.violation() {
            Some(Violation::VersionMismatch {
                installed,
                operator,
                required,
            }) => {
                assert_eq!(installed, "0.1.3");
                assert_eq!(*operator, Operator::Eq);
                assert_eq!(required.as_str(), "0.1.2");
            }
            other => panic!("Expected VersionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn equal_versions_satisfy_ge() {
        let lookup = RecordingLookup::installed("0.1");
        let (_, sink) = run("package>=0.1", &lookup);
        assert!(sink.is_empty());
    }

    #[test]
    fn trailing_zero_components_are_equal() {
        let lookup = RecordingLookup::installed("0.1");
        let (_, sink) = run("package==0.1.0", &lookup);
        assert!(sink.is_empty());
    }

    #[test]
    fn unparsable_installed_version_is_mismatch() {
        let lookup = RecordingLookup::installed("unknown");
        let (_, sink) = run("package>=0.1", &lookup);
        assert_eq!(sink.messages(), ["'package' version mismatch (>=0.1)"]);
    }

    #[test]
    fn installed_version_with_suffix_is_compared_numerically() {
        let lookup = RecordingLookup::installed("1.4.0rc1");
        let (_, sink) = run("package>=1.4", &lookup);
        assert!(sink.is_empty());
    }

    #[test]
    fn violation_does_not_stop_later_constraints() {
        let installed: InstalledPackages = [("a", "1.0"), ("c", "3.0")].into_iter().collect();
        let mut sink = CollectingSink::new();
        let report =
            verify_packages("a>1.0\nb\nc>=3\nd==1", &installed, &mut sink).unwrap();

        assert_eq!(report.len(), 4);
        assert_eq!(
            sink.messages(),
            [
                "'a' version mismatch (>1.0)",
                "mandatory package 'b' not found",
                "mandatory package 'd' not found",
            ]
        );
        assert!(report.results()[2].outcome.is_satisfied());
    }

    #[test]
    fn lookup_failure_is_reported_as_missing() {
        let lookup = |name: &str| -> std::result::Result<String, LookupError> {
            Err(LookupError::Failed {
                name: name.to_string(),
                message: "permission denied".to_string(),
            })
        };
        let (_, sink) = run("tool", &lookup);
        assert_eq!(sink.messages(), ["mandatory package 'tool' not found"]);
    }

    #[test]
    fn malformed_text_fails_before_any_lookup() {
        let lookup = RecordingLookup::installed("1.0");
        let mut sink = CollectingSink::new();
        let err = verify_packages("good\nbad>=1.x", &lookup, &mut sink).unwrap_err();

        assert!(matches!(err, DepcheckError::MalformedRequirement { line: 2, .. }));
        assert!(lookup.calls().is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn verification_is_idempotent() {
        let installed: InstalledPackages = [("a", "0.5")].into_iter().collect();
        let text = "a>=1\nb";
        let (first_report, first) = run(text, &installed);
        let (second_report, second) = run(text, &installed);
        assert_eq!(first.warnings(), second.warnings());
        assert_eq!(first_report, second_report);
    }

    #[test]
    fn verify_all_accepts_prebuilt_constraints() {
        let installed: InstalledPackages = [("a", "2")].into_iter().collect();
        let verifier = Verifier::new(&installed);
        let mut sink = CollectingSink::new();
        let constraints = vec![
            Constraint::with_version("a", Operator::Gt, Version::parse("1").unwrap()),
            Constraint::exists("A"),
        ];
        let report = verifier.verify_all(constraints, &mut sink);
        assert!(report.is_satisfied());
        assert!(sink.is_empty());
    }

    #[test]
    fn empty_text_checks_nothing() {
        let lookup = RecordingLookup::installed("1.0");
        let (report, sink) = run("\n\n", &lookup);
        assert!(report.is_empty());
        assert!(sink.is_empty());
        assert!(lookup.calls().is_empty());
    }
}
