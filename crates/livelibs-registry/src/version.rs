//! Version tokens and library references.
//!
//! Versions are opaque: they are compared for exact equality only. A version
//! that happens to be valid semver can be ranked by precedence when the
//! registry is configured for [`VersionResolution::HighestSemver`].
//!
//! References use the harness syntax:
//! - `foo` → latest applicable version of `foo`
//! - `foo@0.1.2` → exactly version `0.1.2`
//!
//! [`VersionResolution::HighestSemver`]: crate::config::VersionResolution::HighestSemver

use std::borrow::Borrow;

use serde::Serialize;

use crate::error::{RegistryError, RegistryResult};
use crate::name::LibraryName;

/// An opaque version token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Parse a version token. Only emptiness is rejected.
    pub fn parse(version: &str) -> RegistryResult<Self> {
        if version.trim().is_empty() {
            return Err(RegistryError::invalid_input(
                "version",
                "version cannot be empty",
            ));
        }
        Ok(Self(version.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token as semver, if it parses as such.
    pub fn semver(&self) -> Option<semver::Version> {
        semver::Version::parse(&self.0).ok()
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Version {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Borrow<str> for Version {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A parsed `name[@version]` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRef {
    pub name: LibraryName,
    pub version: Option<Version>,
}

impl LibraryRef {
    /// Parse a library reference.
    ///
    /// ```
    /// use livelibs_registry::LibraryRef;
    ///
    /// let latest = LibraryRef::parse("foo").unwrap();
    /// assert!(latest.version.is_none());
    ///
    /// let pinned = LibraryRef::parse("foo@0.1.2").unwrap();
    /// assert_eq!(pinned.version.unwrap().as_str(), "0.1.2");
    ///
    /// assert!(LibraryRef::parse("foo@").is_err());
    /// ```
    pub fn parse(reference: &str) -> RegistryResult<Self> {
        let reference = reference.trim();

        if reference.is_empty() {
            return Err(RegistryError::InvalidReference {
                reference: reference.to_string(),
                reason: "empty reference".to_string(),
            });
        }

        let (name, version) = match reference.split_once('@') {
            Some((name, version)) => {
                if version.is_empty() {
                    return Err(RegistryError::InvalidReference {
                        reference: reference.to_string(),
                        reason: "version is required after '@'".to_string(),
                    });
                }
                (name, Some(Version::parse(version)?))
            }
            None => (reference, None),
        };

        Ok(Self {
            name: LibraryName::parse(name)?,
            version,
        })
    }
}

impl std::fmt::Display for LibraryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

impl std::str::FromStr for LibraryRef {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
