use tracing::debug;

use super::super::Registry;
use crate::error::{RegistryError, RegistryResult};
use crate::name::LibraryName;
use crate::types::LibraryInfo;
use crate::version::Version;

pub(crate) fn get_impl(
    registry: &Registry,
    name: &str,
    version: Option<&str>,
) -> RegistryResult<LibraryInfo> {
    let index = registry.read_index();
    let (name, resolved, entry) =
        index.resolve(name, version, registry.config.version_resolution)?;

    let record = entry.lock();
    if record.lock_state().is_locked() {
        debug!(name = %name, version = %resolved, "lookup denied: library locked");
        return Err(RegistryError::Locked {
            name: name.to_string(),
            version: resolved.to_string(),
        });
    }

    debug!(name = %name, version = %resolved, "lookup hit");
    Ok(record.info(name, resolved))
}

pub(crate) fn all_names_impl(registry: &Registry) -> Vec<LibraryName> {
    registry.read_index().libraries.keys().cloned().collect()
}

pub(crate) fn versions_impl(registry: &Registry, name: &str) -> RegistryResult<Vec<Version>> {
    let index = registry.read_index();
    let library = index
        .libraries
        .get(name)
        .ok_or_else(|| RegistryError::not_found(name, None))?;

    Ok(library
        .ordered_versions()
        .into_iter()
        .map(|(v, _)| v.clone())
        .collect())
}
