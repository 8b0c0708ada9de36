//! Registry configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// How `get` picks a version when none is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionResolution {
    /// The most recently registered version wins (re-registering counts).
    #[default]
    LatestRegistered,

    /// Highest semver precedence wins. Falls back to `LatestRegistered`
    /// when no registered version parses as semver.
    HighestSemver,
}

impl std::str::FromStr for VersionResolution {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "latest-registered" => Ok(Self::LatestRegistered),
            "highest-semver" => Ok(Self::HighestSemver),
            other => Err(RegistryError::Config {
                message: format!(
                    "unknown version resolution {:?} (expected latest-registered or highest-semver)",
                    other
                ),
            }),
        }
    }
}

/// Registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Version resolution policy for unversioned lookups.
    #[serde(default)]
    pub version_resolution: VersionResolution,
}

impl RegistryConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `LIVELIBS_VERSION_RESOLUTION` | `latest-registered` (default) or `highest-semver` |
    pub fn from_env() -> RegistryResult<Self> {
        let version_resolution = match std::env::var("LIVELIBS_VERSION_RESOLUTION") {
            Ok(v) => v.parse()?,
            Err(_) => VersionResolution::default(),
        };
        Ok(Self { version_resolution })
    }

    /// Load config from a YAML file.
    pub fn load(path: &Path) -> RegistryResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> RegistryResult<Self> {
        serde_yaml::from_str(content).map_err(|e| RegistryError::Config {
            message: format!("invalid registry config: {}", e),
        })
    }

    pub fn with_version_resolution(mut self, resolution: VersionResolution) -> Self {
        self.version_resolution = resolution;
        self
    }
}
