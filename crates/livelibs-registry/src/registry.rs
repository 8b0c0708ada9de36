//! Registry: in-process store of versioned library records.
//!
//! Provides the funding-gated directory with:
//! - Multiple coexisting versions per library name
//! - Per-record funding thresholds and contribution tracking
//! - Name enumeration independent of lock state
//!
//! The registry is a cheap-to-clone handle; clones share state. The name
//! index sits behind an `RwLock` and every record behind its own `Mutex`, so
//! lookups and contributions on different records never serialize on each
//! other. Only `register` takes the index write lock.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::RegistryConfig;
use crate::error::RegistryResult;
use crate::name::LibraryName;
use crate::registry_next::index::Index;
use crate::registry_next::{contribute, lookup, register};
use crate::snapshot::RegistrySnapshot;
use crate::types::{FundingStatus, LibraryInfo, RegisterOptions, Wei};
use crate::version::{LibraryRef, Version};

/// Shared, thread-safe library registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub(crate) index: Arc<RwLock<Index>>,
    pub(crate) config: RegistryConfig,
}

impl Registry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            index: Arc::default(),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Create or fully replace the record at `(name, version)`.
    ///
    /// A replaced record starts over: new threshold, `total_value` back to 0.
    /// Validation failures leave the registry untouched.
    pub fn register(
        &self,
        name: &str,
        version: &str,
        address: &str,
        abi: &str,
        options: RegisterOptions,
    ) -> RegistryResult<()> {
        register::register_impl(self, name, version, address, abi, options)
    }

    /// Read a record. With `version = None` the configured resolution policy
    /// picks the version.
    ///
    /// Fails with `NotFound` for unknown names/versions and with `Locked`
    /// when the record's funding threshold has not been met.
    pub fn get(&self, name: &str, version: Option<&str>) -> RegistryResult<LibraryInfo> {
        lookup::get_impl(self, name, version)
    }

    /// [`Registry::get`] for a parsed `name[@version]` reference.
    pub fn get_ref(&self, reference: &LibraryRef) -> RegistryResult<LibraryInfo> {
        self.get(
            reference.name.as_str(),
            reference.version.as_ref().map(Version::as_str),
        )
    }

    /// Add `amount_wei` to the record's running total. Never creates a record.
    pub fn contribute_to(
        &self,
        name: &str,
        version: &str,
        amount_wei: Wei,
    ) -> RegistryResult<FundingStatus> {
        contribute::contribute_to_impl(self, name, version, amount_wei)
    }

    /// Funding state of a record. Available while locked.
    pub fn funding(&self, name: &str, version: &str) -> RegistryResult<FundingStatus> {
        contribute::funding_impl(self, name, version)
    }

    /// Every registered name, sorted. Includes names whose records are locked.
    pub fn all_names(&self) -> Vec<LibraryName> {
        lookup::all_names_impl(self)
    }

    /// Versions registered under `name`, in registration order (oldest first).
    pub fn versions(&self, name: &str) -> RegistryResult<Vec<Version>> {
        lookup::versions_impl(self, name)
    }

    /// Serializable export of every record, locked ones included.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot::capture(self)
    }

    /// Number of stored `(name, version)` records.
    pub fn len(&self) -> usize {
        self.read_index().record_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Records are only ever assigned whole, so a poisoned lock still guards
    // consistent data.
    pub(crate) fn read_index(&self) -> RwLockReadGuard<'_, Index> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write_index(&self) -> RwLockWriteGuard<'_, Index> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }
}
