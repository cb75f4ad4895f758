//! Request payloads accepted by the lifecycle services.
//!
//! `created_by` / `approved_by` stamps are not part of these payloads; they
//! come from the explicit [`Identity`](crate::types::Identity) argument of
//! each service call.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

use crate::types::VersionStatus;

/// Create a category and its version 1.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddCategoryRequest {
	pub name: Box<str>,
	#[serde(default)]
	pub description: Box<str>,
	/// Opaque JSON schema; serialized verbatim into the version record
	pub schema: serde_json::Value,
}

/// Edit a category. The target `status` drives the three-way update branch:
/// Retired tears the whole category down, otherwise the latest version's own
/// status decides between mutate-in-place and append-new-version.
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateCategoryRequest {
	pub category_id: Box<str>,
	#[serde(default)]
	pub description: Box<str>,
	pub schema: serde_json::Value,
	pub status: Option<VersionStatus>,
}

/// Create a configuration under a category, pinned to `category_version`,
/// with a caller-supplied initial status for its version 1.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddConfigurationRequest {
	pub category_id: Box<str>,
	pub category_version: u32,
	pub name: Box<str>,
	#[serde(default)]
	pub description: Box<str>,
	pub status: VersionStatus,
	#[serde(default)]
	pub fields: BTreeMap<String, serde_json::Value>,
}

/// Edit a configuration. Always appends a new version (status forced to
/// In Editing); never mutates an existing one.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateConfigurationRequest {
	pub category_id: Box<str>,
	pub configuration_id: Box<str>,
	#[serde(default)]
	pub description: Box<str>,
	#[serde(default)]
	pub fields: BTreeMap<String, serde_json::Value>,
}

/// Targeted single-version update by exact (configuration_id, version_num)
/// key.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateConfigVersionRequest {
	pub status: Option<VersionStatus>,
	pub approved_by: Option<Box<str>>,
	#[serde(default)]
	pub description: Box<str>,
	#[serde(default)]
	pub fields: BTreeMap<String, serde_json::Value>,
}

/// Create a user group. Membership and category-access sets are supplied
/// wholesale here and only here; later mutation goes through the add/remove
/// operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserGroupRequest {
	pub user_group_name: Box<str>,
	#[serde(default)]
	pub user_list: Vec<String>,
	#[serde(default)]
	pub category_access: Vec<String>,
}

// vim: ts=4
