//! Implementation modules for `registry`.
//!
//! `src/registry.rs` is the stable facade; the operations live here.

pub(crate) mod contribute;
pub(crate) mod index;
pub(crate) mod lookup;
pub(crate) mod register;
