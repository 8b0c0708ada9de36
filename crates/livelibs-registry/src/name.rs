//! Library names.
//!
//! A name is an opaque identifier capped at [`MAX_NAME_BYTES`] bytes of UTF-8.
//! Over-length names are rejected, never truncated.

use std::borrow::Borrow;

use serde::Serialize;

use crate::error::{RegistryError, RegistryResult};

/// Maximum library name length in bytes (UTF-8 encoded).
pub const MAX_NAME_BYTES: usize = 32;

/// A validated library name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LibraryName(String);

impl LibraryName {
    /// Parse and validate a library name.
    ///
    /// ```
    /// use livelibs_registry::{LibraryName, RegistryError};
    ///
    /// let name = LibraryName::parse("foo").unwrap();
    /// assert_eq!(name.as_str(), "foo");
    ///
    /// let err = LibraryName::parse("abcdefghijklmnopqrstuvwxyz1234567").unwrap_err();
    /// assert!(matches!(err, RegistryError::NameTooLong { len: 33, .. }));
    /// ```
    pub fn parse(name: &str) -> RegistryResult<Self> {
        if name.trim().is_empty() {
            return Err(RegistryError::invalid_input(
                "name",
                "library name cannot be empty",
            ));
        }

        let len = name.len();
        if len > MAX_NAME_BYTES {
            return Err(RegistryError::NameTooLong {
                name: name.to_string(),
                len,
                max: MAX_NAME_BYTES,
            });
        }

        Ok(Self(name.to_string()))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes, not characters.
    pub fn len_bytes(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for LibraryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for LibraryName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Borrow<str> for LibraryName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LibraryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
