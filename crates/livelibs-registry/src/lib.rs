//! Versioned library registry with funding-gated visibility.
//!
//! Maps a library name and version to deployment metadata (address, ABI,
//! documentation URL). Each record may carry a funding threshold; until the
//! contributions tracked against it reach that threshold the record is
//! locked and `get` refuses to reveal it.
//!
//! # Quick Start
//!
//! ```
//! use livelibs_registry::{RegisterOptions, Registry};
//!
//! # fn main() -> Result<(), livelibs_registry::RegistryError> {
//! let registry = Registry::new();
//! registry.register(
//!     "xyz",
//!     "30.1.2",
//!     "0xcd2a3d9f938e13cd947ec05abc7fe734df8dd826",
//!     "[]",
//!     RegisterOptions::default().with_threshold_wei(1000),
//! )?;
//!
//! assert!(registry.get("xyz", None).unwrap_err().is_locked());
//!
//! registry.contribute_to("xyz", "30.1.2", 250)?;
//! registry.contribute_to("xyz", "30.1.2", 750)?;
//! assert_eq!(registry.get("xyz", None)?.total_value, 1000);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `LIVELIBS_VERSION_RESOLUTION` | `latest-registered` (default) or `highest-semver` |

pub mod config;
pub mod error;
pub mod name;
pub mod registry;
mod registry_next;
pub mod snapshot;
pub mod types;
pub mod version;

// Re-export main types
pub use config::{RegistryConfig, VersionResolution};
pub use error::{RegistryError, RegistryResult};
pub use name::{LibraryName, MAX_NAME_BYTES};
pub use registry::Registry;
pub use snapshot::{LibrarySnapshot, RegistrySnapshot, VersionSnapshot};
pub use types::{FundingStatus, LibraryInfo, LockState, RegisterOptions, Wei};
pub use version::{LibraryRef, Version};
