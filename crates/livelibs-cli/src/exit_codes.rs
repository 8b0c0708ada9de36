//! Exit codes for the `livelibs` binary. Part of the public contract.

pub const SUCCESS: i32 = 0;
pub const SCENARIO_FAILED: i32 = 1; // At least one step missed its expectation
pub const CONFIG_ERROR: i32 = 2; // Unreadable scenario or registry config
