//! Parsed requirement constraints.

use crate::requirements::version::Version;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a requirement clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    /// `==`
    #[serde(rename = "==")]
    Eq,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `>`
    #[serde(rename = ">")]
    Gt,
}

impl Operator {
    /// Every supported operator, longest symbol first so `>=` wins over `>`.
    pub const ALL: [Operator; 3] = [Operator::Eq, Operator::Ge, Operator::Gt];

    /// The operator as written in requirement text.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ge => ">=",
            Operator::Gt => ">",
        }
    }

    /// Whether `installed <op> required` holds.
    pub fn is_satisfied_by(self, installed: &Version, required: &Version) -> bool {
        let ord = installed.cmp(required);
        match self {
            Operator::Eq => ord == Ordering::Equal,
            Operator::Ge => ord != Ordering::Less,
            Operator::Gt => ord == Ordering::Greater,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| format!("unsupported operator: {}", s))
    }
}

/// The comparison half of a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRequirement {
    /// How the installed version is compared.
    pub operator: Operator,
    /// The version on the right-hand side.
    pub version: Version,
}

impl VersionRequirement {
    /// Whether an installed version meets this requirement.
    pub fn matches(&self, installed: &Version) -> bool {
        self.operator.is_satisfied_by(installed, &self.version)
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// One actionable requirement: a package name and an optional comparison.
///
/// Without a comparison the constraint only asserts that the package is
/// installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    /// Package name as written.
    pub name: String,
    /// Version comparison, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<VersionRequirement>,
}

impl Constraint {
    /// A constraint that only checks the package exists.
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirement: None,
        }
    }

    /// A constraint with a version comparison.
    pub fn with_version(name: impl Into<String>, operator: Operator, version: Version) -> Self {
        Self {
            name: name.into(),
            requirement: Some(VersionRequirement { operator, version }),
        }
    }

    /// Case-folded name used to match packages.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// The operator, if the constraint compares versions.
    pub fn operator(&self) -> Option<Operator> {
        self.requirement.as_ref().map(|r| r.operator)
    }

    /// The required version, if the constraint compares versions.
    pub fn version(&self) -> Option<&Version> {
        self.requirement.as_ref().map(|r| &r.version)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.requirement {
            Some(req) => write!(f, "{}{}", self.name, req),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for Constraint {
    type Err = crate::error::DepcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::requirements::parser::parse_line(s, 1)?.ok_or_else(|| {
            crate::error::DepcheckError::MalformedRequirement {
                line: 1,
                text: s.trim().to_string(),
                reason: "empty requirement".to_string(),
            }
        })
    }
}
