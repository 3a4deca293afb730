use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default prefix for design names ("P1", "P2", ...).
pub const DEFAULT_DESIGN_PREFIX: &str = "P";

/// Name of one design variant. Used as the key for its body, part,
/// section and displayer in the modeling environment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DesignName(String);

impl DesignName {
    /// Build the name for design `index` with the given prefix, e.g. `P3`.
    pub fn indexed(prefix: &str, index: u32) -> Self {
        Self(format!("{prefix}{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing ordinal of the name, if it has one (`P12` -> 12).
    pub fn ordinal(&self) -> Option<u32> {
        let digits_start = self
            .0
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        self.0[digits_start..].parse().ok()
    }

    /// File name of this design's geometry, e.g. `P3.x_b`.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for DesignName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DesignName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors from parsing a design name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DesignNameError {
    #[error("design name is empty")]
    Empty,

    #[error("design name {name:?} contains a path separator")]
    PathSeparator { name: String },
}

impl FromStr for DesignName {
    type Err = DesignNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DesignNameError::Empty);
        }
        // The name becomes a file stem for geometry and image artifacts.
        if trimmed.contains('/') || trimmed.contains('\\') {
            return Err(DesignNameError::PathSeparator {
                name: trimmed.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for DesignName {
    type Error = DesignNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DesignName> for String {
    fn from(name: DesignName) -> Self {
        name.0
    }
}

/// A contiguous, ascending range of numbered designs (`P1..=P8`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRange {
    pub prefix: String,
    /// Index of the first design.
    pub first: u32,
    /// Number of designs in the range.
    pub count: u32,
}

impl DesignRange {
    pub fn new(prefix: impl Into<String>, first: u32, count: u32) -> Self {
        Self {
            prefix: prefix.into(),
            first,
            count,
        }
    }

    /// Designs in strictly ascending index order.
    pub fn designs(&self) -> impl Iterator<Item = (u32, DesignName)> + '_ {
        (self.first..self.first.saturating_add(self.count))
            .map(move |i| (i, DesignName::indexed(&self.prefix, i)))
    }

    pub fn contains(&self, name: &DesignName) -> bool {
        self.designs().any(|(_, n)| &n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for DesignRange {
    fn default() -> Self {
        Self::new(DEFAULT_DESIGN_PREFIX, 1, 8)
    }
}

/// Build `[prefix+first, ..., prefix+last]` as an ordered picture list.
pub fn design_list(prefix: &str, first: u32, last: u32) -> Vec<DesignName> {
    (first..=last)
        .map(|i| DesignName::indexed(prefix, i))
        .collect()
}
