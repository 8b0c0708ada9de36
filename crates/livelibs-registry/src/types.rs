//! Record and snapshot types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::name::LibraryName;
use crate::version::Version;

/// Funding amounts, in wei.
pub type Wei = u128;

/// Optional fields for `register`, with their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterOptions {
    /// Documentation URL (default: empty).
    #[serde(default, rename = "docURL")]
    pub doc_url: String,

    /// Source URL (default: empty). Stored, never validated.
    #[serde(default, rename = "sourceURL")]
    pub source_url: String,

    /// Funding required before the record is readable (default: 0, unlocked).
    #[serde(default, rename = "thresholdWei")]
    pub threshold_wei: Wei,
}

impl RegisterOptions {
    pub fn with_doc_url(mut self, url: impl Into<String>) -> Self {
        self.doc_url = url.into();
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn with_threshold_wei(mut self, threshold: Wei) -> Self {
        self.threshold_wei = threshold;
        self
    }
}

/// Visibility of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    Locked,
    Unlocked,
}

impl LockState {
    /// Locked iff `total < threshold`; a zero threshold is always unlocked.
    pub fn of(threshold_wei: Wei, total_value: Wei) -> Self {
        if total_value < threshold_wei {
            Self::Locked
        } else {
            Self::Unlocked
        }
    }

    pub fn is_locked(self) -> bool {
        self == Self::Locked
    }
}

/// Stored metadata for one `(name, version)` pair.
#[derive(Debug, Clone)]
pub(crate) struct LibraryRecord {
    pub address: String,
    pub abi: String,
    pub doc_url: String,
    pub source_url: String,
    pub threshold_wei: Wei,
    pub total_value: Wei,
    pub registered_at: DateTime<Utc>,
}

impl LibraryRecord {
    pub fn lock_state(&self) -> LockState {
        LockState::of(self.threshold_wei, self.total_value)
    }

    pub fn info(&self, name: &LibraryName, version: &Version) -> LibraryInfo {
        LibraryInfo {
            name: name.clone(),
            version: version.clone(),
            address: self.address.clone(),
            abi: self.abi.clone(),
            doc_url: self.doc_url.clone(),
            source_url: self.source_url.clone(),
            threshold_wei: self.threshold_wei,
            total_value: self.total_value,
            registered_at: self.registered_at,
        }
    }

    pub fn funding(&self, name: &LibraryName, version: &Version) -> FundingStatus {
        FundingStatus {
            name: name.clone(),
            version: version.clone(),
            threshold_wei: self.threshold_wei,
            total_value: self.total_value,
            remaining_wei: self.threshold_wei.saturating_sub(self.total_value),
            state: self.lock_state(),
        }
    }
}

/// Read-only snapshot of a record, as returned by `get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryInfo {
    pub name: LibraryName,
    pub version: Version,
    pub address: String,
    pub abi: String,
    #[serde(rename = "docURL")]
    pub doc_url: String,
    #[serde(rename = "sourceURL")]
    pub source_url: String,
    #[serde(rename = "thresholdWei")]
    pub threshold_wei: Wei,
    #[serde(rename = "totalValue")]
    pub total_value: Wei,
    #[serde(rename = "registeredAt")]
    pub registered_at: DateTime<Utc>,
}

/// Funding view of a record. Never carries the gated contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FundingStatus {
    pub name: LibraryName,
    pub version: Version,
    #[serde(rename = "thresholdWei")]
    pub threshold_wei: Wei,
    #[serde(rename = "totalValue")]
    pub total_value: Wei,
    #[serde(rename = "remainingWei")]
    pub remaining_wei: Wei,
    pub state: LockState,
}

impl FundingStatus {
    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }
}
