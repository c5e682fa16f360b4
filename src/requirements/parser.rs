//! Requirement text parsing.
//!
//! Requirement text holds one requirement per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! numpy>=1.9.0
//! scipy>0.14
//! pandas==0.19.2
//! setuptools
//! ```
//!
//! A line is a package name optionally followed by one of `==`, `>=` or `>`
//! and a dotted numeric version. A bare name only checks that the package is
//! installed.
//!
//! # Example
//!
//! ```
//! use depcheck::requirements::{parse_requirements, Operator};
//!
//! let reqs = parse_requirements("numpy>=1.9\n\nsetuptools\n");
//! let constraints: Vec<_> = reqs.iter().collect::<Result<_, _>>().unwrap();
//! assert_eq!(constraints.len(), 2);
//! assert_eq!(constraints[0].operator(), Some(Operator::Ge));
//! assert!(constraints[1].operator().is_none());
//! ```

use crate::error::{DepcheckError, Result};
use crate::requirements::constraint::{Constraint, Operator};
use crate::requirements::version::Version;
use regex::Regex;
use std::iter::Enumerate;
use std::str::Lines;
use std::sync::LazyLock;

/// Splits a line at its first comparison clause.
static CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^=<>!~]*?)\s*(?P<op>==|>=|>)\s*(?P<version>.*)$")
        .expect("valid clause regex")
});

/// Accepted package names: alphanumerics with inner `.`, `_` and `-`.
static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").expect("valid name regex")
});

/// Requirement text ready to be iterated.
///
/// Parsing is lazy and the text can be walked any number of times; every
/// call to [`Requirements::iter`] starts again from the first line.
#[derive(Debug, Clone, Copy)]
pub struct Requirements<'a> {
    text: &'a str,
}

impl<'a> Requirements<'a> {
    /// Wrap requirement text.
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Iterate the constraints in input order.
    pub fn iter(&self) -> Constraints<'a> {
        Constraints {
            lines: self.text.lines().enumerate(),
        }
    }

    /// Parse every line, stopping at the first malformed one.
    pub fn to_vec(&self) -> Result<Vec<Constraint>> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &Requirements<'a> {
    type Item = Result<Constraint>;
    type IntoIter = Constraints<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for Requirements<'a> {
    type Item = Result<Constraint>;
    type IntoIter = Constraints<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the constraints of a requirement text.
#[derive(Debug, Clone)]
pub struct Constraints<'a> {
    lines: Enumerate<Lines<'a>>,
}

impl Iterator for Constraints<'_> {
    type Item = Result<Constraint>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            match parse_line(line, index + 1) {
                Ok(Some(constraint)) => return Some(Ok(constraint)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

/// Start parsing requirement text.
pub fn parse_requirements(text: &str) -> Requirements<'_> {
    Requirements::new(text)
}

/// Parse one line of requirement text.
///
/// Returns `Ok(None)` for blank and comment-only lines. `line_number` is
/// 1-based and only used for error reporting.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<Constraint>> {
    let content = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
    .trim();

    if content.is_empty() {
        return Ok(None);
    }

    let malformed = |reason: String| DepcheckError::MalformedRequirement {
        line: line_number,
        text: content.to_string(),
        reason,
    };

    let Some(caps) = CLAUSE.captures(content) else {
        return validate_name(content)
            .map(|name| Some(Constraint::exists(name)))
            .map_err(malformed);
    };

    let name = validate_name(&caps["name"]).map_err(malformed)?;
    let operator: Operator = caps["op"].parse().map_err(malformed)?;
    let version = Version::parse(&caps["version"]).map_err(|e| malformed(e.to_string()))?;

    Ok(Some(Constraint::with_version(name, operator, version)))
}

fn validate_name(name: &str) -> std::result::Result<&str, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("missing package name".to_string());
    }
    if !PACKAGE_NAME.is_match(name) {
        return Err(format!("invalid package name '{}'", name));
    }
    Ok(name)
}
