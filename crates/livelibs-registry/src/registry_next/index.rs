use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::VersionResolution;
use crate::error::{RegistryError, RegistryResult};
use crate::name::LibraryName;
use crate::types::LibraryRecord;
use crate::version::Version;

#[derive(Debug, Default)]
pub(crate) struct Index {
    pub libraries: BTreeMap<LibraryName, Library>,
    /// Monotonic registration counter; orders versions by last registration.
    pub next_seq: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Library {
    pub versions: HashMap<Version, Entry>,
}

#[derive(Debug)]
pub(crate) struct Entry {
    pub record: Mutex<LibraryRecord>,
    pub registered_seq: u64,
}

impl Entry {
    pub fn lock(&self) -> MutexGuard<'_, LibraryRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Index {
    pub fn record_count(&self) -> usize {
        self.libraries.values().map(|l| l.versions.len()).sum()
    }

    /// Find the entry for `name`, resolving the version when not given.
    pub fn resolve(
        &self,
        name: &str,
        version: Option<&str>,
        resolution: VersionResolution,
    ) -> RegistryResult<(&LibraryName, &Version, &Entry)> {
        let (name, library) = self
            .libraries
            .get_key_value(name)
            .ok_or_else(|| RegistryError::not_found(name, version))?;

        let found = match version {
            Some(v) => library.versions.get_key_value(v),
            None => library.resolve(resolution),
        };

        found
            .map(|(version, entry)| (name, version, entry))
            .ok_or_else(|| RegistryError::not_found(name.as_str(), version))
    }
}

impl Library {
    pub fn resolve(&self, resolution: VersionResolution) -> Option<(&Version, &Entry)> {
        match resolution {
            VersionResolution::LatestRegistered => self.latest_registered(),
            VersionResolution::HighestSemver => self
                .versions
                .iter()
                .filter_map(|(v, e)| v.semver().map(|sv| (sv, v, e)))
                .max_by(|(a, _, ea), (b, _, eb)| {
                    a.cmp(b).then(ea.registered_seq.cmp(&eb.registered_seq))
                })
                .map(|(_, v, e)| (v, e))
                .or_else(|| self.latest_registered()),
        }
    }

    fn latest_registered(&self) -> Option<(&Version, &Entry)> {
        self.versions.iter().max_by_key(|(_, e)| e.registered_seq)
    }

    /// Versions ordered by their most recent registration, oldest first.
    pub fn ordered_versions(&self) -> Vec<(&Version, &Entry)> {
        let mut versions: Vec<_> = self.versions.iter().collect();
        versions.sort_by_key(|(_, e)| e.registered_seq);
        versions
    }
}
