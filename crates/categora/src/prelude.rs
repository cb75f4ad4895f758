//! Common imports for embedders.

pub use categora_types::prelude::*;
pub use categora_types::store_adapter::StoreAdapter;

pub use categora_access::{GroupService, UserService};
pub use categora_catalog::{CategoryService, VersionEngine};
pub use categora_config::{ConfigVersionEngine, ConfigurationService};

// vim: ts=4
