//! Point-in-time export of registry contents.
//!
//! Snapshots include locked records; they are meant for an operator or a
//! persistence collaborator, not for library consumers.

use serde::Serialize;

use crate::name::LibraryName;
use crate::registry::Registry;
use crate::types::{LibraryInfo, LockState};

/// All records, grouped by library name (sorted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub libraries: Vec<LibrarySnapshot>,
}

/// One library and its versions, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibrarySnapshot {
    pub name: LibraryName,
    pub versions: Vec<VersionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSnapshot {
    #[serde(flatten)]
    pub info: LibraryInfo,
    pub state: LockState,
}

impl RegistrySnapshot {
    /// Each record is copied under its own lock, so every entry is internally
    /// consistent even while contributions land on other records.
    pub(crate) fn capture(registry: &Registry) -> Self {
        let index = registry.read_index();
        let libraries = index
            .libraries
            .iter()
            .map(|(name, library)| LibrarySnapshot {
                name: name.clone(),
                versions: library
                    .ordered_versions()
                    .into_iter()
                    .map(|(version, entry)| {
                        let record = entry.lock();
                        VersionSnapshot {
                            info: record.info(name, version),
                            state: record.lock_state(),
                        }
                    })
                    .collect(),
            })
            .collect();
        Self { libraries }
    }

    pub fn record_count(&self) -> usize {
        self.libraries.iter().map(|l| l.versions.len()).sum()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
