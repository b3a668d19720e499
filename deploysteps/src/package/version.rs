//! Three-component platform versions.

use crate::errors::PackageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `major.minor.patch` version.
///
/// Ordering is numeric per component, so `2.10.0 > 2.9.9`. Pre-release and
/// build suffixes (`-beta`, `-p1`, `+build.5`) are accepted but dropped, which
/// makes `2.4.2-beta` equal to `2.4.2`. A leading `v` is accepted, missing
/// minor/patch components default to zero and a fourth numeric component
/// (Composer's normalized form, `2.4.2.0`) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(semver::Version);

impl Version {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Returns the major component.
    #[must_use]
    pub fn major(&self) -> u64 {
        self.0.major
    }

    /// Returns the minor component.
    #[must_use]
    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    /// Returns the patch component.
    #[must_use]
    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

/// Rewrites Composer-style versions into semver syntax: no `v` prefix,
/// exactly three numeric components, suffix kept.
fn normalize(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
    let suffix_at = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(suffix_at);

    let mut components: Vec<&str> = core.split('.').collect();
    match components.len() {
        1 | 2 => components.resize(3, "0"),
        3 => {}
        4 => {
            components
                .pop()
                .filter(|extra| !extra.is_empty() && extra.bytes().all(|b| b.is_ascii_digit()))?;
        }
        _ => return None,
    }

    Some(format!("{}{suffix}", components.join(".")))
}

impl FromStr for Version {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparseable = || PackageError::Unparseable(s.to_string());

        let normalized = normalize(s).ok_or_else(unparseable)?;
        let mut version = semver::Version::parse(&normalized).map_err(|_| unparseable())?;
        version.pre = semver::Prerelease::EMPTY;
        version.build = semver::BuildMetadata::EMPTY;

        Ok(Self(version))
    }
}

impl TryFrom<String> for Version {
    type Error = PackageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
