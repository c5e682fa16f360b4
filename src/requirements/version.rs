//! Numeric version ordering.
//!
//! A [`Version`] is a dot-separated sequence of non-negative integers.
//! Versions compare component by component, left to right, and a version
//! with fewer components behaves as if padded with trailing zeros, so
//! `0.1` and `0.1.0` are equal.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// First dotted run of digits inside arbitrary text.
static VERSION_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)*").expect("valid version regex"));

/// Why a version string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// The string was empty after trimming.
    #[error("empty version")]
    Empty,

    /// A component was empty or contained something other than ASCII digits.
    #[error("invalid version '{version}': component '{component}' is not a non-negative integer")]
    InvalidComponent { version: String, component: String },

    /// A component does not fit in 64 bits.
    #[error("invalid version '{version}': component '{component}' is too large")]
    Overflow { version: String, component: String },
}

/// A comparable version made of numeric components.
#[derive(Debug, Clone)]
pub struct Version {
    components: Vec<u64>,
    raw: String,
}

impl Version {
    /// Parse a strict dotted version such as `1.2.3`.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let components = raw
            .split('.')
            .map(|component| {
                if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionParseError::InvalidComponent {
                        version: raw.to_string(),
                        component: component.to_string(),
                    });
                }
                component
                    .parse::<u64>()
                    .map_err(|_| VersionParseError::Overflow {
                        version: raw.to_string(),
                        component: component.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            components,
            raw: raw.to_string(),
        })
    }

    /// Find the first dotted version embedded in free-form text.
    ///
    /// Used for installed versions, which come from tool output or package
    /// metadata (`Python 3.11.4`, `v2.0.1`, `1.4.0rc1`).
    pub fn extract(text: &str) -> Option<Self> {
        VERSION_IN_TEXT
            .find_iter(text)
            .find_map(|m| Self::parse(m.as_str()).ok())
    }

    /// The numeric components as written.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// The version text as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| {
                let a = self.components.get(i).copied().unwrap_or(0);
                let b = other.components.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
