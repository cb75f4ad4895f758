//! Categora is a configuration-management backend core.
//!
//! # Features
//!
//! - Categories: named, versioned JSON schema definitions
//!     - append-only version history, contiguous numbering from 1
//!     - approval workflow: In Editing → Pending Approval → Approved
//!     - approving a version retires all older ones and cascades retirement
//!       to configurations pinned to them
//! - Configurations: named instances under a category
//!     - pinned to the category version they were created against
//!     - independently versioned; every edit appends a new version
//! - User groups gating which categories a non-admin user may list
//! - Pluggable persistence through the `StoreAdapter` trait
//!
//! HTTP routing, token issuance, and password hashing are deliberately not
//! here; this crate is the state machine those layers wrap.

// Re-export shared types and the adapter trait from categora-types
pub use categora_types::error;
pub use categora_types::requests;
pub use categora_types::store_adapter;
pub use categora_types::types;
pub use categora_types::utils;

// Feature crate re-exports
pub use categora_access as access;
pub use categora_catalog as catalog;
pub use categora_config as config;

pub mod prelude;

pub use categora_access::{GroupService, UserService};
pub use categora_catalog::{CategoryService, VersionEngine};
pub use categora_config::{ConfigVersionEngine, ConfigurationService};

// vim: ts=4
