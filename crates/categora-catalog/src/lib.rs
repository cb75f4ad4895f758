//! Category lifecycle for Categora.
//!
//! A category owns an append-only, monotonically numbered history of schema
//! versions. [`version::VersionEngine`] maintains that history;
//! [`category::CategoryService`] drives the approval state machine over the
//! latest version, including the cross-entity cascade that retires
//! configurations pinned to retired category versions.

pub mod category;
pub mod version;

mod prelude;

pub use category::CategoryService;
pub use version::VersionEngine;

// vim: ts=4
