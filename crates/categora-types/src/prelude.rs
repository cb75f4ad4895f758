//! Common imports for Categora crates and adapters.

pub use crate::error::{CgResult, Error};
pub use crate::types::{
	Category, ConfigVersion, Configuration, Identity, User, UserGroup, Version, VersionStatus,
};
pub use crate::utils::{now_iso, random_id};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
