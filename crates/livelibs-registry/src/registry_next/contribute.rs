use tracing::{debug, info};

use super::super::Registry;
use crate::error::RegistryResult;
use crate::types::{FundingStatus, Wei};

pub(crate) fn contribute_to_impl(
    registry: &Registry,
    name: &str,
    version: &str,
    amount_wei: Wei,
) -> RegistryResult<FundingStatus> {
    let index = registry.read_index();
    // Explicit version only: a contribution must never target a resolved guess.
    let (name, version, entry) =
        index.resolve(name, Some(version), registry.config.version_resolution)?;

    let mut record = entry.lock();
    let was_locked = record.lock_state().is_locked();
    // Saturates instead of wrapping; the total stays non-decreasing.
    record.total_value = record.total_value.saturating_add(amount_wei);
    let status = record.funding(name, version);
    drop(record);

    if was_locked && !status.is_locked() {
        info!(
            name = %name,
            version = %version,
            total_value = %status.total_value,
            threshold_wei = %status.threshold_wei,
            "library unlocked by contribution"
        );
    } else {
        debug!(
            name = %name,
            version = %version,
            amount_wei = %amount_wei,
            total_value = %status.total_value,
            "recorded contribution"
        );
    }

    Ok(status)
}

pub(crate) fn funding_impl(
    registry: &Registry,
    name: &str,
    version: &str,
) -> RegistryResult<FundingStatus> {
    let index = registry.read_index();
    let (name, version, entry) =
        index.resolve(name, Some(version), registry.config.version_resolution)?;
    let status = entry.lock().funding(name, version);
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::types::{LockState, RegisterOptions};

    const ADDR: &str = "0xcd2a3d9f938e13cd947ec05abc7fe734df8dd826";

    fn locked_registry(threshold: Wei) -> Registry {
        let registry = Registry::new();
        registry
            .register(
                "xyz",
                "30.1.2",
                ADDR,
                "[]",
                RegisterOptions::default().with_threshold_wei(threshold),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_cumulative_contributions_unlock_at_threshold() {
        let registry = locked_registry(1000);

        let status = registry.contribute_to("xyz", "30.1.2", 250).unwrap();
        assert_eq!(status.total_value, 250);
        assert_eq!(status.remaining_wei, 750);
        assert_eq!(status.state, LockState::Locked);
        assert!(registry.get("xyz", None).unwrap_err().is_locked());

        let status = registry.contribute_to("xyz", "30.1.2", 750).unwrap();
        assert_eq!(status.total_value, 1000);
        assert_eq!(status.state, LockState::Unlocked);

        let info = registry.get("xyz", None).unwrap();
        assert_eq!(info.total_value, 1000);
        assert_eq!(info.address, ADDR);
    }

    #[test]
    fn test_contribution_to_missing_pair_creates_nothing() {
        let registry = locked_registry(1000);

        let err = registry.contribute_to("nope", "1.0.0", 10).unwrap_err();
        assert!(err.is_not_found());
        let err = registry.contribute_to("xyz", "9.9.9", 10).unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotFound {
                name: "xyz".to_string(),
                version: Some("9.9.9".to_string()),
            }
        );

        assert_eq!(registry.len(), 1);
        assert!(registry.get("nope", None).unwrap_err().is_not_found());
    }

    #[test]
    fn test_total_saturates() {
        let registry = locked_registry(Wei::MAX);
        registry.contribute_to("xyz", "30.1.2", Wei::MAX - 1).unwrap();
        let status = registry.contribute_to("xyz", "30.1.2", 10).unwrap();
        assert_eq!(status.total_value, Wei::MAX);
        assert!(!status.is_locked());
    }

    #[test]
    fn test_zero_contribution_is_noop() {
        let registry = locked_registry(1000);
        let status = registry.contribute_to("xyz", "30.1.2", 0).unwrap();
        assert_eq!(status.total_value, 0);
        assert!(status.is_locked());
    }

    #[test]
    fn test_funding_visible_while_locked() {
        let registry = locked_registry(1000);
        registry.contribute_to("xyz", "30.1.2", 400).unwrap();
        let status = registry.funding("xyz", "30.1.2").unwrap();
        assert_eq!(status.total_value, 400);
        assert_eq!(status.remaining_wei, 600);
        assert!(status.is_locked());
    }

    #[test]
    fn test_reregister_resets_funding() {
        let registry = locked_registry(1000);
        registry.contribute_to("xyz", "30.1.2", 1000).unwrap();
        assert!(registry.get("xyz", Some("30.1.2")).is_ok());

        registry
            .register(
                "xyz",
                "30.1.2",
                ADDR,
                "[]",
                RegisterOptions::default().with_threshold_wei(500),
            )
            .unwrap();

        let status = registry.funding("xyz", "30.1.2").unwrap();
        assert_eq!(status.total_value, 0);
        assert_eq!(status.threshold_wei, 500);
        assert!(registry.get("xyz", Some("30.1.2")).unwrap_err().is_locked());
    }
}
