use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use tracing::{info, warn};

use super::super::Registry;
use super::index::Entry;
use crate::error::{RegistryError, RegistryResult};
use crate::name::LibraryName;
use crate::types::{LibraryRecord, RegisterOptions};
use crate::version::Version;

pub(crate) fn register_impl(
    registry: &Registry,
    name: &str,
    version: &str,
    address: &str,
    abi: &str,
    options: RegisterOptions,
) -> RegistryResult<()> {
    let (name, version) = match validate(name, version, address, abi) {
        Ok(key) => key,
        Err(e) => {
            warn!(name, version, error = %e, "rejected library registration");
            return Err(e);
        }
    };

    let RegisterOptions {
        doc_url,
        source_url,
        threshold_wei,
    } = options;

    let record = LibraryRecord {
        address: address.to_string(),
        abi: abi.to_string(),
        doc_url,
        source_url,
        threshold_wei,
        total_value: 0,
        registered_at: Utc::now(),
    };
    let locked = record.lock_state().is_locked();

    let mut index = registry.write_index();
    index.next_seq += 1;
    let seq = index.next_seq;

    let library = index.libraries.entry(name.clone()).or_default();
    let replaced = match library.versions.get_mut(&version) {
        Some(entry) => {
            *entry.record.get_mut().unwrap_or_else(PoisonError::into_inner) = record;
            entry.registered_seq = seq;
            true
        }
        None => {
            library.versions.insert(
                version.clone(),
                Entry {
                    record: Mutex::new(record),
                    registered_seq: seq,
                },
            );
            false
        }
    };
    drop(index);

    info!(
        name = %name,
        version = %version,
        threshold_wei = %threshold_wei,
        locked,
        replaced,
        "registered library"
    );
    Ok(())
}

fn validate(
    name: &str,
    version: &str,
    address: &str,
    abi: &str,
) -> RegistryResult<(LibraryName, Version)> {
    let name = LibraryName::parse(name)?;
    let version = Version::parse(version)?;

    if address.trim().is_empty() {
        return Err(RegistryError::invalid_input(
            "address",
            "deployment address is required",
        ));
    }
    if abi.trim().is_empty() {
        return Err(RegistryError::invalid_input(
            "abi",
            "interface description is required",
        ));
    }

    Ok((name, version))
}
