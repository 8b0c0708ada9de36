//! Error types for the library registry.

/// Registry errors.
///
/// `NotFound` and `Locked` are kept apart so callers can tell "never existed"
/// from "exists but not yet funded".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Library name exceeds the byte limit. Nothing was written.
    #[error("library name too long: {len} bytes (max {max}): {name:?}")]
    NameTooLong { name: String, len: usize, max: usize },

    /// No record for the name, or for the explicitly requested version.
    #[error("library not found: {}", display_key(.name, .version.as_deref()))]
    NotFound {
        name: String,
        version: Option<String>,
    },

    /// Record exists but its funding threshold has not been met.
    #[error("library locked until funded: {name}@{version}")]
    Locked { name: String, version: String },

    /// A required field was empty or malformed.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Invalid `name[@version]` reference.
    #[error("invalid library reference: {reference} - {reason}")]
    InvalidReference { reference: String, reason: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

fn display_key(name: &str, version: Option<&str>) -> String {
    match version {
        Some(v) => format!("{}@{}", name, v),
        None => name.to_string(),
    }
}

impl RegistryError {
    pub(crate) fn not_found(name: impl Into<String>, version: Option<&str>) -> Self {
        Self::NotFound {
            name: name.into(),
            version: version.map(String::from),
        }
    }

    pub(crate) fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 1,
            Self::Config { .. } => 2,
            Self::Locked { .. } => 3,
            Self::NameTooLong { .. } => 4,
            Self::InvalidInput { .. } => 4,
            Self::InvalidReference { .. } => 4,
        }
    }

    /// Whether the error means the record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the error means the record exists but is gated.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
